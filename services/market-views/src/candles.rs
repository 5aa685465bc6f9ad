//! OHLC candle aggregation over filled orders
//!
//! Buckets the filled history into hourly candles. Bucket boundaries are
//! aligned to the top of the hour in the local timezone, the same zone
//! the display timestamps use. Buckets with no trades are omitted, not
//! zero-filled.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::Price;
use types::order::{OrderEvent, TokenPair};

use crate::decorate::{decorate, DecoratedOrder};

/// Seconds per bucket.
const HOUR_SECONDS: i64 = 3600;

/// A single OHLC candle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start (Unix epoch second, top of the local hour)
    pub bucket_start: i64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Summed base-token volume across the bucket
    pub volume: Decimal,
    /// Number of fills in the bucket
    pub trade_count: u32,
}

impl Candle {
    /// Create a candle from the first fill in its bucket.
    fn new(price: Price, volume: Decimal, bucket_start: i64) -> Self {
        Self {
            bucket_start,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
            trade_count: 1,
        }
    }

    /// Fold another fill into the candle.
    fn update(&mut self, price: Price, volume: Decimal) {
        if price > self.high {
            self.high = price;
        }
        if price < self.low {
            self.low = price;
        }
        self.close = price;
        self.volume += volume;
        self.trade_count += 1;
    }

    /// Validate candle integrity (OHLC invariants).
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= Decimal::ZERO
    }
}

/// Direction of the most recent price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDirection {
    /// Last price at or above the second-to-last
    #[serde(rename = "+")]
    Up,
    /// Last price below the second-to-last
    #[serde(rename = "-")]
    Down,
}

impl PriceDirection {
    /// Display symbol: `+` or `-`
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceDirection::Up => "+",
            PriceDirection::Down => "-",
        }
    }
}

/// The price-chart view: last-price summary plus the candle series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChart {
    /// Price of the most recent fill; zero with fewer than 2 fills
    pub last_price: Price,
    /// Direction of the last move; up with fewer than 2 fills
    pub last_price_direction: PriceDirection,
    /// Candles in ascending bucket-start order
    pub candles: Vec<Candle>,
}

impl Default for PriceChart {
    fn default() -> Self {
        Self {
            last_price: Price::zero(),
            last_price_direction: PriceDirection::Up,
            candles: Vec::new(),
        }
    }
}

/// Build the price chart from the filled-order history.
///
/// Filters to the pair, drops price-less fills, sorts ascending by
/// timestamp (stable, so same-second fills keep arrival order), then
/// buckets by local hour.
pub fn build_chart(filled: &[OrderEvent], pair: &TokenPair) -> PriceChart {
    let mut fills: Vec<DecoratedOrder> = filled
        .iter()
        .filter(|order| order.involves_only(pair))
        .map(|order| decorate(order, pair))
        .filter(|decorated| decorated.price.is_some())
        .collect();
    fills.sort_by_key(|decorated| decorated.timestamp());

    let (last_price, last_price_direction) = last_price_summary(&fills);

    // BTreeMap keys give ascending bucket emission for free.
    let mut buckets: BTreeMap<i64, Candle> = BTreeMap::new();
    for fill in &fills {
        let Some(price) = fill.price else { continue };
        let volume = fill.base_amount.as_decimal().unwrap_or(Decimal::ZERO);
        buckets
            .entry(hour_bucket(fill.timestamp()))
            .and_modify(|candle| candle.update(price, volume))
            .or_insert_with(|| Candle::new(price, volume, hour_bucket(fill.timestamp())));
    }

    PriceChart {
        last_price,
        last_price_direction,
        candles: buckets.into_values().collect(),
    }
}

/// Last price and move direction from the ascending-sorted fills.
///
/// Fewer than 2 qualifying fills is the degenerate case: price zero,
/// direction up.
fn last_price_summary(fills: &[DecoratedOrder]) -> (Price, PriceDirection) {
    match fills {
        [.., second_last, last] => match (second_last.price, last.price) {
            (Some(previous), Some(current)) => {
                let direction = if current >= previous {
                    PriceDirection::Up
                } else {
                    PriceDirection::Down
                };
                (current, direction)
            }
            _ => (Price::zero(), PriceDirection::Up),
        },
        _ => (Price::zero(), PriceDirection::Up),
    }
}

/// Start of the local-time hour containing `timestamp`.
///
/// Falls back to the UTC hour floor when the local instant cannot be
/// represented (DST gaps, out-of-range values).
pub fn hour_bucket(timestamp: i64) -> i64 {
    let utc_floor = timestamp - timestamp.rem_euclid(HOUR_SECONDS);
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(datetime) => datetime
            .with_minute(0)
            .and_then(|dt| dt.with_second(0))
            .and_then(|dt| dt.with_nanosecond(0))
            .map(|dt| dt.timestamp())
            .unwrap_or(utc_floor),
        None => utc_floor,
    }
}
