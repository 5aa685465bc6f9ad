//! Single-slot memoization cells
//!
//! Each view owns one [`MemoCell`] keyed by the digests of its relevant
//! inputs. A matching key returns the cached value behind the same `Arc`
//! allocation, giving consumers pointer equality for unchanged views; a
//! differing key recomputes exactly once and replaces the slot.

use std::sync::Arc;

/// A one-entry cache from input key to shared output
#[derive(Debug)]
pub struct MemoCell<K, V> {
    slot: Option<(K, Arc<V>)>,
}

impl<K: PartialEq, V> MemoCell<K, V> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Return the cached value for `key`, computing it when the key
    /// differs from the previous call.
    ///
    /// The boolean is true on a cache hit.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> (Arc<V>, bool) {
        if let Some((cached_key, cached_value)) = &self.slot {
            if *cached_key == key {
                return (Arc::clone(cached_value), true);
            }
        }

        let value = Arc::new(compute());
        self.slot = Some((key, Arc::clone(&value)));
        (value, false)
    }
}

impl<K: PartialEq, V> Default for MemoCell<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
