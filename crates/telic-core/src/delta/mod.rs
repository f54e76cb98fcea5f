//! Structural delta engine.
//!
//! Compares two structured values and reports every field that was added,
//! removed or modified, keyed by its path from the root.
//!
//! ## Entry point
//!
//! ```
//! use serde_json::json;
//! use telic_core::delta::{diff, FieldPath};
//!
//! let delta = diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3}));
//! assert_eq!(delta.len(), 1);
//! assert!(delta.get(&FieldPath::from("b")).is_some());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: keys are visited in sorted order and paths are kept in
//!   an ordered map, so identical inputs give identical deltas.
//! - **Whole-sequence comparison**: sequences are never diffed by index.
//! - **Numeric equality**: `1` and `1.0` are the same value.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff, diff_payloads};
pub use human_summary::render_delta_summary;
pub use model::{ChangeKind, Delta, DeltaEntry, FieldChange, FieldPath, Slot};
