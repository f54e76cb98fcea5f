//! Engine configuration
//!
//! All fields have defaults, so an empty document is a valid configuration.
//!
//! ```toml
//! default_max_depth = 10
//! fixed_point_exit = false
//! history_limit = 64
//! ```

use crate::errors::{Result, TelicError};
use crate::recursion::MaxDepth;
use serde::{Deserialize, Serialize};

/// Tunables for a state container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Bound used by `teli_recurse` when the caller passes no `max_depth`
    pub default_max_depth: u32,
    /// Stop recursion early once the purpose function returns its input unchanged
    ///
    /// Off by default: `purpose` also receives the depth, so an unchanged value
    /// at one depth does not mean later depths leave it unchanged.
    pub fixed_point_exit: bool,
    /// Number of transition records retained; 0 disables history
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_depth: MaxDepth::DEFAULT.get(),
            fixed_point_exit: false,
            history_limit: 64,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document is not valid TOML, a value has the
    /// wrong type, or it contains an unknown key.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TelicError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    pub fn with_default_max_depth(mut self, depth: u32) -> Self {
        self.default_max_depth = depth;
        self
    }

    pub fn with_fixed_point_exit(mut self, enabled: bool) -> Self {
        self.fixed_point_exit = enabled;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn default_max_depth(&self) -> MaxDepth {
        MaxDepth::from(self.default_max_depth)
    }
}
