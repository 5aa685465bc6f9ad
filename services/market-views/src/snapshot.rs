//! Immutable per-pass input snapshots and their content digests
//!
//! A derivation pass reads a [`MarketSnapshot`], a frozen copy of the
//! event source's state. The snapshot is never mutated by this layer; a
//! concurrent append on the source side simply becomes the next snapshot.
//!
//! Each collection gets a SHA-256 content digest over the raw event
//! fields. The digests key the memoized view caches, so a view recomputes
//! exactly when a collection it reads actually changed.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use types::ids::Address;
use types::order::{OrderEvent, TokenPair};

/// Frozen inputs for one derivation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Every order ever created, in arrival order
    pub all_orders: Vec<OrderEvent>,
    /// Cancellation events, in arrival order
    pub cancelled_orders: Vec<OrderEvent>,
    /// Fill events, in arrival order
    pub filled_orders: Vec<OrderEvent>,
    /// The configured pair; `None` while token metadata is unresolved
    pub pair: Option<TokenPair>,
    /// The active account; `None` when no wallet is connected
    pub account: Option<Address>,
}

impl MarketSnapshot {
    /// Digest all three collections for cache keying.
    pub fn digests(&self) -> CollectionDigests {
        CollectionDigests {
            all: digest_orders(&self.all_orders),
            cancelled: digest_orders(&self.cancelled_orders),
            filled: digest_orders(&self.filled_orders),
        }
    }
}

/// SHA-256 digest of one event collection's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

/// Digests of the three raw collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionDigests {
    pub all: Digest,
    pub cancelled: Digest,
    pub filled: Digest,
}

/// Compute a content digest over a collection's raw event fields.
///
/// Covers every field that any derivation reads, so two collections with
/// equal digests are interchangeable inputs.
pub fn digest_orders(orders: &[OrderEvent]) -> Digest {
    let mut hasher = Sha256::new();

    for order in orders {
        hasher.update(order.id.value().to_le_bytes());
        hasher.update(order.user.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(order.token_get.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(order.amount_get.minor_units().to_le_bytes());
        hasher.update(order.token_give.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(order.amount_give.minor_units().to_le_bytes());
        hasher.update(order.timestamp.to_le_bytes());
        hasher.update(b"\n");
    }

    Digest(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::TokenAmount;

    fn event(id: u64) -> OrderEvent {
        OrderEvent {
            id: OrderId::new(id),
            user: Address::new("0x00000000000000000000000000000000000000aa"),
            token_get: Address::new("0x0000000000000000000000000000000000000b00"),
            amount_get: TokenAmount::from_whole(1),
            token_give: Address::new("0x0000000000000000000000000000000000000c00"),
            amount_give: TokenAmount::from_whole(2),
            timestamp: 1_700_000_000 + id as i64,
        }
    }

    #[test]
    fn test_digest_is_deterministic() {
        let orders = vec![event(1), event(2)];
        assert_eq!(digest_orders(&orders), digest_orders(&orders.clone()));
    }

    #[test]
    fn test_digest_changes_on_append() {
        let before = digest_orders(&[event(1)]);
        let after = digest_orders(&[event(1), event(2)]);
        assert_ne!(before, after);
    }

    #[test]
    fn test_digest_changes_on_field_change() {
        let mut changed = event(1);
        changed.amount_get = TokenAmount::from_whole(9);
        assert_ne!(digest_orders(&[event(1)]), digest_orders(&[changed]));
    }

    #[test]
    fn test_digest_is_order_sensitive() {
        assert_ne!(
            digest_orders(&[event(1), event(2)]),
            digest_orders(&[event(2), event(1)])
        );
    }

    #[test]
    fn test_empty_collection_digest_is_stable() {
        assert_eq!(digest_orders(&[]), digest_orders(&[]));
    }

    #[test]
    fn test_snapshot_digests_track_their_collections() {
        let mut snapshot = MarketSnapshot::default();
        let before = snapshot.digests();

        snapshot.filled_orders.push(event(1));
        let after = snapshot.digests();

        assert_eq!(before.all, after.all);
        assert_eq!(before.cancelled, after.cancelled);
        assert_ne!(before.filled, after.filled);
    }
}
