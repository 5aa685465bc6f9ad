//! Side classification and display coloring
//!
//! An order offering the quote token in exchange for base is a buy; one
//! offering base for quote is a sell. Trend coloring compares each filled
//! order's price against its predecessor in a single timestamp-ascending
//! walk; the computed colors survive any later re-sort for display.

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::Price;
use types::order::{OrderEvent, Side, TokenPair};

use crate::decorate::DecoratedOrder;

/// Display color for buys and upward price moves.
pub const GREEN: &str = "#25CE8F";

/// Display color for sells and downward price moves.
pub const RED: &str = "#F45353";

/// Price movement relative to the preceding fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Price at or above the previous fill
    Up,
    /// Price below the previous fill
    Down,
}

impl Trend {
    /// Display color for this trend direction
    pub fn css_color(&self) -> &'static str {
        match self {
            Trend::Up => GREEN,
            Trend::Down => RED,
        }
    }
}

/// A decorated order extended with its buy/sell classification
///
/// `trend` is populated only on trade-tape entries, where an order's color
/// depends on its position in the filled history rather than on the order
/// alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedOrder {
    /// The decorated order
    pub decorated: DecoratedOrder,
    /// Buy or sell, relative to the configured pair
    pub side: Side,
    /// Price movement tag; `None` outside the trade tape
    pub trend: Option<Trend>,
}

impl ClassifiedOrder {
    /// The underlying order id
    pub fn id(&self) -> OrderId {
        self.decorated.id()
    }

    /// The underlying event timestamp (Unix epoch second)
    pub fn timestamp(&self) -> i64 {
        self.decorated.timestamp()
    }

    /// The derived quote-per-base price, if defined
    pub fn price(&self) -> Option<Price> {
        self.decorated.price
    }

    /// Display color for the order's side
    pub fn side_color(&self) -> &'static str {
        match self.side {
            Side::BUY => GREEN,
            Side::SELL => RED,
        }
    }

    /// The action a counterparty takes to fill this order
    pub fn fill_action(&self) -> Side {
        self.side.opposite()
    }

    /// Display color for the trend tag, when present
    pub fn trend_color(&self) -> Option<&'static str> {
        self.trend.map(|trend| trend.css_color())
    }
}

/// Classify a raw order's side against the configured pair.
///
/// Total and deterministic: every order is exactly one of buy or sell.
pub fn side_of(order: &OrderEvent, pair: &TokenPair) -> Side {
    if order.token_give == *pair.quote() {
        Side::BUY
    } else {
        Side::SELL
    }
}

/// Attach the side classification to a decorated order.
pub fn classify(decorated: DecoratedOrder, pair: &TokenPair) -> ClassifiedOrder {
    let side = side_of(&decorated.order, pair);
    ClassifiedOrder {
        decorated,
        side,
        trend: None,
    }
}

/// Color a filled-order sequence already sorted ascending by timestamp.
///
/// Single left-to-right pass. The first element has no predecessor and is
/// treated as its own: it compares equal to itself and colors up. An entry
/// without a price keeps the previous reference price and colors up.
pub fn color_trend(orders: &mut [ClassifiedOrder]) {
    let mut previous: Option<Price> = None;

    for order in orders.iter_mut() {
        order.trend = match (previous, order.decorated.price) {
            (None, _) => Some(Trend::Up),
            (Some(prev), Some(current)) => {
                Some(if prev <= current { Trend::Up } else { Trend::Down })
            }
            (Some(_), None) => Some(Trend::Up),
        };
        if let Some(current) = order.decorated.price {
            previous = Some(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::decorate;
    use types::ids::Address;
    use types::numeric::TokenAmount;

    fn base() -> Address {
        Address::new("0x0000000000000000000000000000000000000b00")
    }

    fn quote() -> Address {
        Address::new("0x0000000000000000000000000000000000000c00")
    }

    fn pair() -> TokenPair {
        TokenPair::try_new(base(), quote()).unwrap()
    }

    /// Filled order at the given quote-per-base price (1 base each time).
    fn fill_at(id: u64, price_hundredths: u64, timestamp: i64) -> OrderEvent {
        OrderEvent {
            id: OrderId::new(id),
            user: Address::new("0x00000000000000000000000000000000000000aa"),
            token_get: base(),
            amount_get: TokenAmount::from_whole(100),
            token_give: quote(),
            amount_give: TokenAmount::from_whole(price_hundredths),
            timestamp,
        }
    }

    fn classified(order: &OrderEvent) -> ClassifiedOrder {
        classify(decorate(order, &pair()), &pair())
    }

    #[test]
    fn test_side_buy_iff_gives_quote() {
        let buy = fill_at(1, 100, 0);
        assert_eq!(side_of(&buy, &pair()), Side::BUY);

        let mut sell = fill_at(2, 100, 0);
        std::mem::swap(&mut sell.token_get, &mut sell.token_give);
        assert_eq!(side_of(&sell, &pair()), Side::SELL);
    }

    #[test]
    fn test_side_colors() {
        let buy = classified(&fill_at(1, 100, 0));
        assert_eq!(buy.side_color(), GREEN);
        assert_eq!(buy.fill_action(), Side::SELL);

        let mut sell_event = fill_at(2, 100, 0);
        std::mem::swap(&mut sell_event.token_get, &mut sell_event.token_give);
        let sell = classified(&sell_event);
        assert_eq!(sell.side_color(), RED);
        assert_eq!(sell.fill_action(), Side::BUY);
    }

    #[test]
    fn test_first_element_always_colors_up() {
        let mut orders = vec![classified(&fill_at(1, 100, 100))];
        color_trend(&mut orders);
        assert_eq!(orders[0].trend, Some(Trend::Up));
        assert_eq!(orders[0].trend_color(), Some(GREEN));
    }

    #[test]
    fn test_trend_walk_up_up_down() {
        // Prices 1.0, 1.2, 0.9 → up, up, down
        let mut orders = vec![
            classified(&fill_at(1, 100, 100)),
            classified(&fill_at(2, 120, 200)),
            classified(&fill_at(3, 90, 300)),
        ];
        color_trend(&mut orders);
        let trends: Vec<Trend> = orders.iter().filter_map(|o| o.trend).collect();
        assert_eq!(trends, vec![Trend::Up, Trend::Up, Trend::Down]);
    }

    #[test]
    fn test_equal_price_colors_up() {
        let mut orders = vec![
            classified(&fill_at(1, 100, 100)),
            classified(&fill_at(2, 100, 200)),
        ];
        color_trend(&mut orders);
        assert_eq!(orders[1].trend, Some(Trend::Up));
    }

    #[test]
    fn test_priceless_entry_keeps_reference_price() {
        let mut no_price = fill_at(2, 100, 200);
        no_price.amount_get = TokenAmount::new(0);

        let mut orders = vec![
            classified(&fill_at(1, 120, 100)),
            classified(&no_price),
            classified(&fill_at(3, 90, 300)),
        ];
        color_trend(&mut orders);
        // The priceless entry colors up and does not reset the walk:
        // 0.9 still compares against 1.2, not against nothing.
        assert_eq!(orders[1].trend, Some(Trend::Up));
        assert_eq!(orders[2].trend, Some(Trend::Down));
    }

    #[test]
    fn test_colors_survive_display_resort() {
        let mut orders = vec![
            classified(&fill_at(1, 100, 100)),
            classified(&fill_at(2, 120, 200)),
            classified(&fill_at(3, 90, 300)),
        ];
        color_trend(&mut orders);
        let by_id_before: Vec<(u64, Option<Trend>)> =
            orders.iter().map(|o| (o.id().value(), o.trend)).collect();

        // Re-sort descending for display; tags must not change
        orders.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        for (id, trend) in by_id_before {
            let found = orders.iter().find(|o| o.id().value() == id).unwrap();
            assert_eq!(found.trend, trend);
        }
    }

    #[test]
    fn test_classified_serialization_roundtrip() {
        let mut orders = vec![classified(&fill_at(1, 100, 100))];
        color_trend(&mut orders);
        let json = serde_json::to_string(&orders[0]).unwrap();
        let deserialized: ClassifiedOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(orders[0], deserialized);
    }
}
