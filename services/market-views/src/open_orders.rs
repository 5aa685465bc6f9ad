//! Open-order resolution
//!
//! An order is open while its id has not yet appeared in the filled or
//! cancelled collections. Membership is checked against a hash set built
//! once per call, not by scanning the terminal collections per order.

use std::collections::HashSet;

use types::ids::OrderId;
use types::order::OrderEvent;

/// Resolve the still-open subset of `created`.
///
/// Preserves the relative arrival order of `created`. Ids are compared as
/// values: an id present in either terminal collection closes the order
/// regardless of which event instance carries it. Returns owned clones so
/// the result can outlive the snapshot it was derived from.
pub fn open_orders(
    created: &[OrderEvent],
    filled: &[OrderEvent],
    cancelled: &[OrderEvent],
) -> Vec<OrderEvent> {
    let closed: HashSet<OrderId> = filled
        .iter()
        .chain(cancelled.iter())
        .map(|order| order.id)
        .collect();

    created
        .iter()
        .filter(|order| !closed.contains(&order.id))
        .cloned()
        .collect()
}
