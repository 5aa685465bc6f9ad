//! The memoized view engine
//!
//! The only surface the rendering layer may call. Each public view is a
//! pure function of a stated subset of the snapshot; its memo cell is
//! keyed by exactly the digests of that subset, so irrelevant input
//! changes never trigger a recompute, and identical inputs return the
//! previous `Arc` allocation unchanged.
//!
//! The open-order stage is shared: the order book and the per-account
//! view both resolve it through one memo cell, so a change to the raw
//! collections recomputes it once no matter how many downstream views
//! are requested.

use std::sync::Arc;

use tracing::{debug, info};
use types::ids::Address;
use types::order::{OrderEvent, TokenPair};

use crate::candles::{build_chart, PriceChart};
use crate::classify::{classify, color_trend, ClassifiedOrder};
use crate::decorate::decorate;
use crate::memo::MemoCell;
use crate::metrics::{View, ViewMetrics};
use crate::open_orders::open_orders;
use crate::order_book::{build_book, OrderBook};
use crate::snapshot::{CollectionDigests, Digest, MarketSnapshot};

/// Cache key for pair-scoped views over the open-order stage.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BookKey {
    digests: CollectionDigests,
    pair: Option<TokenPair>,
}

/// Cache key for views that read only the filled collection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FilledKey {
    filled: Digest,
    pair: Option<TokenPair>,
}

/// Cache key for the per-account open-order view.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AccountKey {
    digests: CollectionDigests,
    pair: Option<TokenPair>,
    account: Option<Address>,
}

/// Derives and caches the four public market views
///
/// Single-threaded and demand-driven: every view call is synchronous,
/// reads only the given snapshot, and completes fully before returning.
pub struct ViewEngine {
    open_orders: MemoCell<CollectionDigests, Vec<OrderEvent>>,
    my_open_orders: MemoCell<AccountKey, Vec<ClassifiedOrder>>,
    order_book: MemoCell<BookKey, OrderBook>,
    trade_tape: MemoCell<FilledKey, Vec<ClassifiedOrder>>,
    price_chart: MemoCell<FilledKey, PriceChart>,
    metrics: ViewMetrics,
}

impl ViewEngine {
    /// Create an engine with empty caches.
    pub fn new() -> Self {
        info!("view engine initialized");
        Self {
            open_orders: MemoCell::new(),
            my_open_orders: MemoCell::new(),
            order_book: MemoCell::new(),
            trade_tape: MemoCell::new(),
            price_chart: MemoCell::new(),
            metrics: ViewMetrics::new(),
        }
    }

    /// Per-view recompute and cache-hit counters.
    pub fn metrics(&self) -> &ViewMetrics {
        &self.metrics
    }

    /// The active account's open orders, timestamp-descending.
    ///
    /// Empty until both the pair and an account are resolved. Orders with
    /// an undefined price stay listed here: the account should still see
    /// its own order even if no price can be shown for it.
    pub fn my_open_orders(&mut self, snapshot: &MarketSnapshot) -> Arc<Vec<ClassifiedOrder>> {
        let digests = snapshot.digests();
        let open = self.resolve_open(snapshot, digests);

        let key = AccountKey {
            digests,
            pair: snapshot.pair.clone(),
            account: snapshot.account.clone(),
        };
        let (orders, cache_hit) = self.my_open_orders.get_or_compute(key, || {
            match (&snapshot.pair, &snapshot.account) {
                (Some(pair), Some(account)) => {
                    let mut mine: Vec<ClassifiedOrder> = open
                        .iter()
                        .filter(|order| order.user == *account)
                        .filter(|order| order.involves_only(pair))
                        .map(|order| classify(decorate(order, pair), pair))
                        .collect();
                    mine.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
                    mine
                }
                _ => Vec::new(),
            }
        });

        self.metrics.record(View::MyOpenOrders, cache_hit);
        debug!(
            view = View::MyOpenOrders.label(),
            cache_hit,
            orders = orders.len(),
            "view served"
        );
        orders
    }

    /// The order book over all open orders for the pair.
    pub fn order_book(&mut self, snapshot: &MarketSnapshot) -> Arc<OrderBook> {
        let digests = snapshot.digests();
        let open = self.resolve_open(snapshot, digests);

        let key = BookKey {
            digests,
            pair: snapshot.pair.clone(),
        };
        let (book, cache_hit) = self.order_book.get_or_compute(key, || match &snapshot.pair {
            Some(pair) => build_book(&open, pair),
            None => OrderBook::default(),
        });

        self.metrics.record(View::OrderBook, cache_hit);
        debug!(
            view = View::OrderBook.label(),
            cache_hit,
            buys = book.buy.len(),
            sells = book.sell.len(),
            "view served"
        );
        book
    }

    /// The trade tape: filled orders with trend colors, newest first.
    ///
    /// Colors are assigned in one ascending-timestamp pass, then the
    /// sequence is re-sorted descending for display without recoloring.
    pub fn trade_tape(&mut self, snapshot: &MarketSnapshot) -> Arc<Vec<ClassifiedOrder>> {
        let key = FilledKey {
            filled: snapshot.digests().filled,
            pair: snapshot.pair.clone(),
        };
        let (tape, cache_hit) = self.trade_tape.get_or_compute(key, || match &snapshot.pair {
            Some(pair) => {
                let mut tape: Vec<ClassifiedOrder> = snapshot
                    .filled_orders
                    .iter()
                    .filter(|order| order.involves_only(pair))
                    .map(|order| classify(decorate(order, pair), pair))
                    .filter(|classified| classified.price().is_some())
                    .collect();
                tape.sort_by_key(|classified| classified.timestamp());
                color_trend(&mut tape);
                tape.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
                tape
            }
            None => Vec::new(),
        });

        self.metrics.record(View::TradeTape, cache_hit);
        debug!(
            view = View::TradeTape.label(),
            cache_hit,
            fills = tape.len(),
            "view served"
        );
        tape
    }

    /// The candlestick price chart over the filled history.
    pub fn price_chart(&mut self, snapshot: &MarketSnapshot) -> Arc<PriceChart> {
        let key = FilledKey {
            filled: snapshot.digests().filled,
            pair: snapshot.pair.clone(),
        };
        let (chart, cache_hit) = self.price_chart.get_or_compute(key, || match &snapshot.pair {
            Some(pair) => build_chart(&snapshot.filled_orders, pair),
            None => PriceChart::default(),
        });

        self.metrics.record(View::PriceChart, cache_hit);
        debug!(
            view = View::PriceChart.label(),
            cache_hit,
            candles = chart.candles.len(),
            "view served"
        );
        chart
    }

    /// Shared open-order stage, memoized on the three collection digests.
    fn resolve_open(
        &mut self,
        snapshot: &MarketSnapshot,
        digests: CollectionDigests,
    ) -> Arc<Vec<OrderEvent>> {
        let (open, cache_hit) = self.open_orders.get_or_compute(digests, || {
            open_orders(
                &snapshot.all_orders,
                &snapshot.filled_orders,
                &snapshot.cancelled_orders,
            )
        });

        self.metrics.record(View::OpenOrders, cache_hit);
        open
    }
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::new()
    }
}
