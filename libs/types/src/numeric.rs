//! Minor-unit amounts and derived prices
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point
//! errors). Raw token amounts are 18-decimal fixed-point integers as
//! emitted by the ledger; prices are quote-per-base ratios rounded to
//! 5 decimal places, computed from the raw minor units so display
//! formatting never affects the ratio.

use crate::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional digits in a minor-unit amount (standard ledger fixed point).
pub const AMOUNT_DECIMALS: u32 = 18;

/// Decimal places a derived price is rounded to.
pub const PRICE_DECIMALS: u32 = 5;

/// One whole token in minor units (10^18).
const UNIT: u128 = 1_000_000_000_000_000_000;

/// A token amount in minor units (18-decimal fixed point)
///
/// Stored as the raw integer from the ledger event. Comparisons and price
/// math stay on this form; conversion to a human-readable decimal string
/// happens only at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// Create from raw minor units
    pub fn new(minor_units: u128) -> Self {
        Self(minor_units)
    }

    /// Create from a whole number of tokens
    pub fn from_whole(tokens: u64) -> Self {
        Self(tokens as u128 * UNIT)
    }

    /// Get the raw minor-unit value
    pub fn minor_units(&self) -> u128 {
        self.0
    }

    /// Check for the zero amount
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert to a `Decimal` in whole-token units
    ///
    /// Fails if the amount exceeds the 96-bit decimal mantissa
    /// (≈ 7.9e10 whole tokens).
    pub fn as_decimal(&self) -> Result<Decimal, AmountError> {
        let signed = i128::try_from(self.0).map_err(|_| AmountError::Overflow(self.0))?;
        Decimal::try_from_i128_with_scale(signed, AMOUNT_DECIMALS)
            .map_err(|_| AmountError::Overflow(self.0))
    }

    /// Render as an exact human-readable decimal string
    ///
    /// Pure integer formatting, so any u128 amount renders exactly. Always
    /// includes a decimal point ("1.0", not "1"), matching the ledger
    /// tooling convention.
    pub fn to_units_string(&self) -> String {
        let whole = self.0 / UNIT;
        let frac = self.0 % UNIT;
        if frac == 0 {
            return format!("{whole}.0");
        }
        let mut frac_str = format!("{frac:018}");
        while frac_str.ends_with('0') {
            frac_str.pop();
        }
        format!("{whole}.{frac_str}")
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_units_string())
    }
}

/// A quote-per-base price, rounded to [`PRICE_DECIMALS`] places
///
/// Never negative: constructed only from unsigned amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price (degenerate-input default)
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create from a whole number
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse from a decimal string, rounding to price precision
    pub fn from_str(value: &str) -> Result<Self, AmountError> {
        let dec = Decimal::from_str(value)
            .map_err(|_| AmountError::Unparseable(value.to_string()))?;
        Ok(Self(dec.round_dp_with_strategy(
            PRICE_DECIMALS,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    /// Derive a price from raw minor-unit amounts: quote ÷ base
    ///
    /// The division is guarded: a zero base amount is an error, never an
    /// infinity or NaN. Rounds half away from zero to 5 places.
    pub fn from_ratio(quote: TokenAmount, base: TokenAmount) -> Result<Self, AmountError> {
        if base.is_zero() {
            return Err(AmountError::ZeroBaseAmount);
        }

        let quote_dec = raw_decimal(quote)?;
        let base_dec = raw_decimal(base)?;

        Ok(Self((quote_dec / base_dec).round_dp_with_strategy(
            PRICE_DECIMALS,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minor units as an integer-valued `Decimal` (no scale applied).
///
/// The ratio of two amounts is the same whether taken over minor units or
/// whole tokens, so the price path skips the scale conversion entirely.
fn raw_decimal(amount: TokenAmount) -> Result<Decimal, AmountError> {
    let signed =
        i128::try_from(amount.minor_units()).map_err(|_| AmountError::Overflow(amount.minor_units()))?;
    Decimal::try_from_i128_with_scale(signed, 0).map_err(|_| AmountError::Overflow(amount.minor_units()))
}
