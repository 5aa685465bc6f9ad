//! Raw order lifecycle events and market pair configuration
//!
//! An [`OrderEvent`] is the immutable record appended by the event source
//! when the ledger contract reports an order being created, cancelled, or
//! filled. The three collections share this one shape; which collection an
//! event sits in is what encodes its lifecycle stage.

use crate::errors::PairError;
use crate::ids::{Address, OrderId};
use crate::numeric::TokenAmount;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (offers quote for base)
    BUY,
    /// Sell order (offers base for quote)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// A raw on-chain order lifecycle event
///
/// Never mutated after creation; the event source only appends. `timestamp`
/// is a Unix epoch second from the block the event was mined in, so arrival
/// order and timestamp order may disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Ledger-assigned order id, unique within one collection
    pub id: OrderId,
    /// Account that created the order
    pub user: Address,
    /// Token the order wants to receive
    pub token_get: Address,
    /// Minor-unit amount of `token_get`
    pub amount_get: TokenAmount,
    /// Token the order offers in exchange
    pub token_give: Address,
    /// Minor-unit amount of `token_give`
    pub amount_give: TokenAmount,
    /// Unix epoch second
    pub timestamp: i64,
}

impl OrderEvent {
    /// Check that both of the order's tokens belong to the given pair
    /// (in either role).
    pub fn involves_only(&self, pair: &TokenPair) -> bool {
        pair.contains(&self.token_get) && pair.contains(&self.token_give)
    }
}

/// A configured trading pair: `(base, quote)` token addresses
///
/// The ordering is fixed per market by configuration, never derived from
/// event data. Prices are always expressed as quote-per-base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    base: Address,
    quote: Address,
}

impl TokenPair {
    /// Create a pair, rejecting a base/quote collision
    pub fn try_new(base: Address, quote: Address) -> Result<Self, PairError> {
        if base == quote {
            return Err(PairError::IdenticalTokens(base));
        }
        Ok(Self { base, quote })
    }

    /// The base token address (price denominator)
    pub fn base(&self) -> &Address {
        &self.base
    }

    /// The quote token address (price numerator)
    pub fn quote(&self) -> &Address {
        &self.quote
    }

    /// Check whether an address is one of the pair's tokens
    pub fn contains(&self, token: &Address) -> bool {
        self.base == *token || self.quote == *token
    }
}
