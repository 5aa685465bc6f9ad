//! Order decoration: display attributes for raw order events
//!
//! Resolves which of an order's two amounts is the base amount and which
//! is the quote amount, renders human-readable amount strings, and derives
//! the quote-per-base price. The price comes from the raw minor-unit
//! integers, so display formatting never affects the ratio.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::OrderId;
use types::numeric::{Price, TokenAmount};
use types::order::{OrderEvent, TokenPair};

/// A raw order event enriched with display attributes
///
/// Ephemeral: rebuilt on every derivation pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedOrder {
    /// The underlying raw event
    pub order: OrderEvent,
    /// Amount of the pair's base token
    pub base_amount: TokenAmount,
    /// Amount of the pair's quote token
    pub quote_amount: TokenAmount,
    /// Base amount as a human-readable decimal string
    pub base_amount_display: String,
    /// Quote amount as a human-readable decimal string
    pub quote_amount_display: String,
    /// Quote-per-base price; `None` when the base amount is zero
    pub price: Option<Price>,
    /// Local-time display string; cosmetic only, never used for ordering
    pub formatted_timestamp: String,
}

impl DecoratedOrder {
    /// The underlying order id
    pub fn id(&self) -> OrderId {
        self.order.id
    }

    /// The underlying event timestamp (Unix epoch second)
    pub fn timestamp(&self) -> i64 {
        self.order.timestamp
    }
}

/// Decorate a raw order event against the configured pair.
///
/// An order giving the quote token is acquiring base: its `amount_get` is
/// the base amount. Otherwise it is giving base away and `amount_give` is
/// the base amount.
pub fn decorate(order: &OrderEvent, pair: &TokenPair) -> DecoratedOrder {
    let (base_amount, quote_amount) = if order.token_give == *pair.quote() {
        (order.amount_get, order.amount_give)
    } else {
        (order.amount_give, order.amount_get)
    };

    let price = match Price::from_ratio(quote_amount, base_amount) {
        Ok(price) => Some(price),
        Err(err) => {
            debug!(order_id = %order.id, %err, "price undefined for order");
            None
        }
    };

    DecoratedOrder {
        order: order.clone(),
        base_amount,
        quote_amount,
        base_amount_display: base_amount.to_units_string(),
        quote_amount_display: quote_amount.to_units_string(),
        price,
        formatted_timestamp: format_timestamp(order.timestamp),
    }
}

/// Render a Unix epoch second as a local-time display string.
///
/// Out-of-range timestamps fall back to the raw number rather than failing
/// the derivation pass.
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(datetime) => datetime.format("%-I:%M:%S%P %b %-d %Y").to_string(),
        None => timestamp.to_string(),
    }
}
