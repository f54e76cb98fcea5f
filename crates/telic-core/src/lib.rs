//! telic core - state container with tracked transitions
//!
//! This crate provides:
//! - [`StateContainer`], a mutable wrapper around a mapping payload with
//!   self-transformation, bounded recursion and tracked transitions
//! - A structural delta engine over `serde_json::Value` trees
//! - A bounded recursion evaluator with optional fixed-point exit
//! - Canonical error and logging facilities

pub mod clock;
pub mod config;
pub mod container;
pub mod delta;
pub mod errors;
pub mod facets;
pub mod logging_facility;
pub mod recursion;
pub mod value;

pub use telic_core_types::schema;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use container::{create_state, StateContainer, TransitionRecord};
pub use delta::{diff, Delta, FieldChange, FieldPath, Slot};
pub use errors::{ExError, ExErrorKind, Result, TelicError, UserError};
pub use facets::{
    conspansive_duality, self_organize, syntactic_semantic, ConspansiveDuality, SyntacticSemantic,
};
pub use recursion::{evaluate, Evaluation, MaxDepth, Termination};
pub use telic_core_types::TransitionId;
pub use value::{payloads_equal, shallow_merge, values_equal, Payload, ValueKind};
