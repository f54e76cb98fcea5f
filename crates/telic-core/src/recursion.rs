//! Bounded recursion evaluator
//!
//! Applies a purpose function repeatedly, threading each result into the
//! next call together with a depth counter:
//!
//! ```text
//! (0, seed) -> (1, f(seed, 0)) -> (2, f(f(seed, 0), 1)) -> ...
//! ```
//!
//! The loop stops when the depth reaches `max_depth`. With fixed-point exit
//! enabled it also stops as soon as a call returns a value structurally equal
//! to its input. That is only equivalent to a full run when `purpose` ignores
//! the depth argument, so callers opt in through `EngineConfig`.

use crate::errors::{Result, TelicError, UserError};
use crate::value::values_equal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on purpose-function invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxDepth(u32);

impl MaxDepth {
    pub const DEFAULT: MaxDepth = MaxDepth(10);

    /// Validate a caller-supplied bound.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `depth` is negative or does not fit in a `u32`.
    pub fn new(depth: i64) -> Result<Self> {
        if depth < 0 {
            return Err(TelicError::InvalidArgument {
                op: "teli_recurse",
                argument: "max_depth",
                reason: format!("must be non-negative, got {}", depth),
            });
        }
        u32::try_from(depth)
            .map(MaxDepth)
            .map_err(|_| TelicError::InvalidArgument {
                op: "teli_recurse",
                argument: "max_depth",
                reason: format!("must be at most {}, got {}", u32::MAX, depth),
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for MaxDepth {
    fn from(depth: u32) -> Self {
        MaxDepth(depth)
    }
}

/// Why the evaluator stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    DepthLimit,
    FixedPoint,
}

/// Outcome of a completed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Final data value
    pub value: Value,
    /// Number of times the purpose function ran (never more than `max_depth`)
    pub invocations: u32,
    pub termination: Termination,
}

/// Run `purpose` from `seed` until the depth limit or a fixed point.
///
/// `seed` is not modified. If `purpose` fails at any depth the evaluation
/// aborts and the error is returned; no partial result is produced.
///
/// # Errors
///
/// `UserFunction` carrying the purpose function's error and the depth it
/// failed at.
pub fn evaluate<F>(
    seed: &Value,
    mut purpose: F,
    max_depth: MaxDepth,
    fixed_point_exit: bool,
) -> Result<Evaluation>
where
    F: FnMut(&Value, u32) -> std::result::Result<Value, UserError>,
{
    let limit = max_depth.get();
    let mut data = seed.clone();
    let mut depth = 0;

    while depth < limit {
        let next = purpose(&data, depth)
            .map_err(|e| TelicError::user_function("teli_recurse", Some(depth), e))?;
        depth += 1;

        if fixed_point_exit && values_equal(&next, &data) {
            tracing::debug!(depth, max_depth = limit, "fixed point reached");
            return Ok(Evaluation {
                value: next,
                invocations: depth,
                termination: Termination::FixedPoint,
            });
        }
        tracing::trace!(depth, "purpose applied");
        data = next;
    }

    tracing::debug!(depth, max_depth = limit, "depth limit reached");
    Ok(Evaluation {
        value: data,
        invocations: depth,
        termination: Termination::DepthLimit,
    })
}
