//! Market View Derivation Service
//!
//! Consumes the event source's raw order collections and produces the
//! four trading-UI views:
//! - Per-account open orders
//! - Order book (ranked buy/sell partitions)
//! - Trade tape with trend coloring
//! - OHLC candlestick price chart
//!
//! All derivations are pure functions of an immutable [`snapshot::MarketSnapshot`];
//! the [`views::ViewEngine`] memoizes each view on content digests of its
//! relevant inputs so a view recomputes exactly once per relevant change.
//!
//! # Architecture
//!
//! ```text
//!  Raw collections (created / cancelled / filled) + pair + account
//!        │
//!   ┌────▼─────┐
//!   │ Snapshot │  ← immutable per-pass inputs, content digests
//!   └────┬─────┘
//!        │
//!   ┌────▼──────┐     ┌──────────┐
//!   │ OpenOrder │     │ Decorate │
//!   │ Resolver  │     │ Classify │
//!   └──┬─────┬──┘     └─┬──────┬─┘
//!      │     │          │      │
//!  ┌───▼──┐ ┌▼──────┐ ┌─▼───┐ ┌▼───────┐
//!  │ Mine │ │ Book  │ │Tape │ │Candles │
//!  └───┬──┘ └┬──────┘ └─┬───┘ └┬───────┘
//!      │     │          │      │
//!  ┌───▼─────▼──────────▼──────▼───┐
//!  │     Memoized View Engine      │
//!  └───────────────────────────────┘
//! ```

pub mod candles;
pub mod classify;
pub mod config;
pub mod decorate;
pub mod memo;
pub mod metrics;
pub mod open_orders;
pub mod order_book;
pub mod snapshot;
pub mod views;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
