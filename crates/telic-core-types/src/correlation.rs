//! Correlation identifiers for state transitions
//!
//! Every committed transition carries a [`TransitionId`] so that log events,
//! errors and history entries can be tied back to the record that produced
//! them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single committed transition
///
/// Generated as a UUIDv7, so ids carry their creation time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(String);

impl TransitionId {
    /// Generate a new TransitionId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
