//! Observability for the memoized view layer
//!
//! Counts recomputes and cache hits per view so the cost of a derivation
//! pass is visible from the outside. Counters are atomics; recording
//! takes `&self` and never contends with the derivation itself.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// The derivation stages and public views tracked by the metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    OpenOrders,
    MyOpenOrders,
    OrderBook,
    TradeTape,
    PriceChart,
}

impl View {
    /// Stable label used in metric exports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            View::OpenOrders => "open_orders",
            View::MyOpenOrders => "my_open_orders",
            View::OrderBook => "order_book",
            View::TradeTape => "trade_tape",
            View::PriceChart => "price_chart",
        }
    }

    fn all() -> &'static [View] {
        &[
            View::OpenOrders,
            View::MyOpenOrders,
            View::OrderBook,
            View::TradeTape,
            View::PriceChart,
        ]
    }
}

/// Recompute / cache-hit counters for one view.
#[derive(Debug, Default)]
struct ViewCounters {
    recomputes: AtomicU64,
    cache_hits: AtomicU64,
}

/// Metrics for the whole view engine
#[derive(Debug, Default)]
pub struct ViewMetrics {
    open_orders: ViewCounters,
    my_open_orders: ViewCounters,
    order_book: ViewCounters,
    trade_tape: ViewCounters,
    price_chart: ViewCounters,
}

impl ViewMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one view request and whether it was served from cache.
    pub fn record(&self, view: View, cache_hit: bool) {
        let counters = self.counters(view);
        if cache_hit {
            counters.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            counters.recomputes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Total recomputes for one view.
    pub fn recomputes(&self, view: View) -> u64 {
        self.counters(view).recomputes.load(Ordering::Relaxed)
    }

    /// Total cache hits for one view.
    pub fn cache_hits(&self, view: View) -> u64 {
        self.counters(view).cache_hits.load(Ordering::Relaxed)
    }

    /// Export all counters as a serializable snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut views = BTreeMap::new();
        for &view in View::all() {
            views.insert(
                view.label().to_string(),
                ViewStats {
                    recomputes: self.recomputes(view),
                    cache_hits: self.cache_hits(view),
                },
            );
        }
        MetricsSnapshot { views }
    }

    fn counters(&self, view: View) -> &ViewCounters {
        match view {
            View::OpenOrders => &self.open_orders,
            View::MyOpenOrders => &self.my_open_orders,
            View::OrderBook => &self.order_book,
            View::TradeTape => &self.trade_tape,
            View::PriceChart => &self.price_chart,
        }
    }
}

/// Point-in-time counter values for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStats {
    pub recomputes: u64,
    pub cache_hits: u64,
}

/// Point-in-time export of all view counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub views: BTreeMap<String, ViewStats>,
}
