//! Shared vocabulary for telic logs and records
//!
//! Kept separate from `telic-core` so that log consumers can depend on the
//! field names and id type without pulling in the engine.

pub mod correlation;
pub mod schema;

pub use correlation::TransitionId;
