//! Order book construction from open orders
//!
//! Filters open orders to the configured pair, classifies each side, and
//! ranks both partitions by price. Both sides rank descending: preserved
//! source behavior, pinned by test (conventional venues would rank asks
//! ascending).

use serde::{Deserialize, Serialize};
use types::order::{OrderEvent, Side, TokenPair};

use crate::classify::{classify, ClassifiedOrder};
use crate::decorate::decorate;

/// The two ranked partitions of the open-order set
///
/// Empty partitions are a normal state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderBook {
    /// Buy orders, price descending
    pub buy: Vec<ClassifiedOrder>,
    /// Sell orders, price descending
    pub sell: Vec<ClassifiedOrder>,
}

impl OrderBook {
    /// Total orders across both partitions
    pub fn len(&self) -> usize {
        self.buy.len() + self.sell.len()
    }

    /// Check whether both partitions are empty
    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }
}

/// Build the order book from the open-order set.
///
/// Orders whose tokens fall outside the pair are skipped, as are orders
/// with an undefined price (zero base amount): a price-ranked view has
/// no slot for them. The sort is stable, so equal-priced orders keep
/// their arrival order.
pub fn build_book(open_orders: &[OrderEvent], pair: &TokenPair) -> OrderBook {
    let mut book = OrderBook::default();

    for order in open_orders.iter().filter(|o| o.involves_only(pair)) {
        let classified = classify(decorate(order, pair), pair);
        if classified.price().is_none() {
            continue;
        }
        match classified.side {
            Side::BUY => book.buy.push(classified),
            Side::SELL => book.sell.push(classified),
        }
    }

    book.buy.sort_by(|a, b| b.price().cmp(&a.price()));
    book.sell.sort_by(|a, b| b.price().cmp(&a.price()));

    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{Address, OrderId};
    use types::numeric::{Price, TokenAmount};

    fn base() -> Address {
        Address::new("0x0000000000000000000000000000000000000b00")
    }

    fn quote() -> Address {
        Address::new("0x0000000000000000000000000000000000000c00")
    }

    fn pair() -> TokenPair {
        TokenPair::try_new(base(), quote()).unwrap()
    }

    /// Buy order: gives quote for 1 base at the given price in hundredths.
    fn buy_at(id: u64, price_hundredths: u64) -> OrderEvent {
        OrderEvent {
            id: OrderId::new(id),
            user: Address::new("0x00000000000000000000000000000000000000aa"),
            token_get: base(),
            amount_get: TokenAmount::from_whole(100),
            token_give: quote(),
            amount_give: TokenAmount::from_whole(price_hundredths),
            timestamp: 1_700_000_000 + id as i64,
        }
    }

    /// Sell order: gives base for quote at the given price in hundredths.
    fn sell_at(id: u64, price_hundredths: u64) -> OrderEvent {
        let mut order = buy_at(id, price_hundredths);
        std::mem::swap(&mut order.token_get, &mut order.token_give);
        std::mem::swap(&mut order.amount_get, &mut order.amount_give);
        order
    }

    fn prices(partition: &[ClassifiedOrder]) -> Vec<Price> {
        partition.iter().filter_map(|o| o.price()).collect()
    }

    fn price(value: &str) -> Price {
        Price::from_str(value).unwrap()
    }

    #[test]
    fn test_partition_by_side() {
        let orders = vec![buy_at(1, 180), sell_at(2, 200), sell_at(3, 250)];
        let book = build_book(&orders, &pair());

        assert_eq!(book.buy.len(), 1);
        assert_eq!(book.sell.len(), 2);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_both_sides_rank_price_descending() {
        let orders = vec![
            sell_at(5, 200),
            sell_at(6, 250),
            buy_at(7, 180),
            buy_at(8, 190),
        ];
        let book = build_book(&orders, &pair());

        assert_eq!(prices(&book.sell), vec![price("2.5"), price("2.0")]);
        assert_eq!(prices(&book.buy), vec![price("1.9"), price("1.8")]);
    }

    // The sell side deliberately ranks descending like the buy side,
    // mirroring the source system; a conventional venue would rank asks
    // ascending.
    #[test]
    fn test_sell_side_sorts_descending_like_buy_side() {
        let orders = vec![sell_at(1, 100), sell_at(2, 300), sell_at(3, 200)];
        let book = build_book(&orders, &pair());

        assert_eq!(prices(&book.sell), vec![price("3.0"), price("2.0"), price("1.0")]);
    }

    #[test]
    fn test_foreign_token_orders_are_filtered() {
        let mut foreign = buy_at(9, 150);
        foreign.token_get = Address::new("0x00000000000000000000000000000000000000ff");

        let orders = vec![buy_at(1, 100), foreign];
        let book = build_book(&orders, &pair());

        assert_eq!(book.len(), 1);
        assert_eq!(book.buy[0].id(), OrderId::new(1));
    }

    #[test]
    fn test_priceless_orders_are_excluded() {
        let mut zero_base = buy_at(4, 100);
        zero_base.amount_get = TokenAmount::new(0);

        let orders = vec![buy_at(1, 100), zero_base];
        let book = build_book(&orders, &pair());

        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_empty_open_set_yields_empty_book() {
        let book = build_book(&[], &pair());
        assert!(book.is_empty());
        assert_eq!(book.len(), 0);
    }

    #[test]
    fn test_equal_prices_keep_arrival_order() {
        let orders = vec![sell_at(1, 200), sell_at(2, 200), sell_at(3, 200)];
        let book = build_book(&orders, &pair());

        let ids: Vec<u64> = book.sell.iter().map(|o| o.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_book_serialization_roundtrip() {
        let orders = vec![buy_at(1, 180), sell_at(2, 200)];
        let book = build_book(&orders, &pair());

        let json = serde_json::to_string(&book).unwrap();
        let deserialized: OrderBook = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }
}
