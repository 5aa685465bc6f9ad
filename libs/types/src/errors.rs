//! Error taxonomy for the types library
//!
//! Narrow on purpose: event inputs are validated upstream by the event
//! source, so the only local failure modes are degenerate numeric inputs
//! and misconfigured pairs. Callers in the view layer convert these into
//! empty or undefined results rather than letting them escape.

use crate::ids::Address;
use thiserror::Error;

/// Amount and price derivation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("zero base amount: price undefined")]
    ZeroBaseAmount,

    #[error("amount exceeds representable range: {0}")]
    Overflow(u128),

    #[error("unparseable decimal: {0}")]
    Unparseable(String),
}

/// Pair configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("base and quote are the same token: {0}")]
    IdenticalTokens(Address),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_error_display() {
        let err = AmountError::ZeroBaseAmount;
        assert_eq!(err.to_string(), "zero base amount: price undefined");
    }

    #[test]
    fn test_pair_error_display() {
        let err = PairError::IdenticalTokens(Address::new("0xAB"));
        assert_eq!(err.to_string(), "base and quote are the same token: 0xab");
    }
}
