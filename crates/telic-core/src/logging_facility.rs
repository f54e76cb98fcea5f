//! Structured logging for container operations
//!
//! - [`init`] installs the global subscriber for a [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` bracket each
//!   container entry point with `start` and `end`/`end_error` events
//! - [`test_capture`] records events in memory so tests can assert on them
//!
//! Only container entry points emit boundary events. The delta engine and
//! the recursion evaluator stay at `debug`/`trace`, so a default
//! `Production` filter shows one start/end pair per call.
//!
//! ```rust
//! use telic_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
