//! Per-network market configuration
//!
//! The pair a market trades is fixed by configuration, keyed by chain id,
//! never derived from event data. The registry deserializes from the same
//! JSON shape the deployment tooling emits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::errors::PairError;
use types::ids::Address;
use types::order::TokenPair;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed market config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Pair(#[from] PairError),
}

/// One configured market in the raw config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PairEntry {
    base: Address,
    quote: Address,
}

/// Registry of configured token pairs, keyed by chain id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    networks: BTreeMap<u64, TokenPair>,
}

impl PairRegistry {
    /// Parse a registry from its JSON representation:
    /// `{ "<chain id>": { "base": "0x…", "quote": "0x…" }, … }`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let entries: BTreeMap<u64, PairEntry> = serde_json::from_str(raw)?;

        let mut networks = BTreeMap::new();
        for (chain_id, entry) in entries {
            networks.insert(chain_id, TokenPair::try_new(entry.base, entry.quote)?);
        }
        Ok(Self { networks })
    }

    /// The configured pair for a network, if any.
    pub fn pair_for(&self, chain_id: u64) -> Option<&TokenPair> {
        self.networks.get(&chain_id)
    }

    /// Number of configured networks.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Check for an empty registry.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
