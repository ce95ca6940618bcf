//! Chain configuration.
//!
//! Defaults suit almost every caller; the JSON form exists so an embedding
//! application can keep chain settings next to the rest of its config.
//!
//! # Example
//!
//! ```
//! use handoff::ChainConfig;
//!
//! let config = ChainConfig::from_json(r#"{ "max_hops": 8 }"#).unwrap();
//! assert!(config.check_cycles);
//! assert_eq!(config.max_hops.map(|n| n.get()), Some(8));
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default for [`ChainConfig::check_cycles`].
pub const DEFAULT_CHECK_CYCLES: bool = true;

/// Settings applied to a [`Chain`](crate::Chain) for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Reject `set_next` calls that would close a loop.
    pub check_cycles: bool,
    /// Maximum handlers a single dispatch may visit.
    ///
    /// `None` uses the number of handlers in the chain, which an acyclic
    /// path can never exceed. A cap of zero would fail every dispatch, so
    /// the JSON form rejects it.
    pub max_hops: Option<NonZeroUsize>,
}

impl ChainConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable link-time cycle checks.
    pub fn with_cycle_checks(mut self, enabled: bool) -> Self {
        self.check_cycles = enabled;
        self
    }

    /// Cap the number of handlers one dispatch may visit.
    ///
    /// `0` removes the cap, falling back to the chain length.
    pub fn with_max_hops(mut self, limit: usize) -> Self {
        self.max_hops = NonZeroUsize::new(limit);
        self
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            check_cycles: DEFAULT_CHECK_CYCLES,
            max_hops: None,
        }
    }
}
