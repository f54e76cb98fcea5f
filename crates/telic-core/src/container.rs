//! State container
//!
//! [`StateContainer`] owns one mapping payload and exposes the three
//! mutation entry points:
//!
//! - [`self_determine`](StateContainer::self_determine): replace the payload
//!   with a transform of itself
//! - [`teli_recurse`](StateContainer::teli_recurse): replace the payload with
//!   the result of bounded recursive application of a purpose function
//! - [`transition`](StateContainer::transition): shallow-merge a patch and
//!   return a [`TransitionRecord`] with snapshots and the computed delta
//!
//! ## Atomicity Contract
//!
//! Every entry point computes the new payload fully before committing it.
//! If a caller-supplied function fails, or returns something that is not a
//! mapping, the payload is left exactly as it was.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use telic_core::create_state;
//!
//! let mut state = create_state(json!({"a": 1, "b": 2}).as_object().cloned());
//! let record = state.transition(json!({"b": 3, "c": 4})).unwrap();
//!
//! assert_eq!(record.delta().len(), 2);
//! assert_eq!(state.to_value(), json!({"a": 1, "b": 3, "c": 4}));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use telic_core_types::TransitionId;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::delta::{diff_payloads, Delta};
use crate::errors::{Result, TelicError, UserError};
use crate::recursion::{self, MaxDepth};
use crate::value::{shallow_merge, type_name, Payload};
use crate::{log_op_end, log_op_error, log_op_start};

/// Snapshot of one committed transition
///
/// `previous` and `current` are owned copies, so later mutation of the
/// container cannot alter a record that was already handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    id: TransitionId,
    recorded_at: DateTime<Utc>,
    previous: Payload,
    current: Payload,
    delta: Delta,
}

impl TransitionRecord {
    pub fn id(&self) -> &TransitionId {
        &self.id
    }

    /// Time reported by the container's clock when the transition committed
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Payload before the transition
    pub fn previous(&self) -> &Payload {
        &self.previous
    }

    /// Payload after the transition
    pub fn current(&self) -> &Payload {
        &self.current
    }

    /// Changes between `previous` and `current`
    pub fn delta(&self) -> &Delta {
        &self.delta
    }
}

/// Mutable wrapper around a mapping payload
///
/// Not internally synchronized: every mutation takes `&mut self`.
#[derive(Clone)]
pub struct StateContainer {
    data: Payload,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    history: VecDeque<TransitionRecord>,
}

impl std::fmt::Debug for StateContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateContainer")
            .field("data", &self.data)
            .field("config", &self.config)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Default for StateContainer {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

impl TryFrom<Value> for StateContainer {
    type Error = TelicError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(TelicError::InvalidArgument {
                op: "create_state",
                argument: "initial_data",
                reason: format!("expected a mapping, got {}", type_name(&other)),
            }),
        }
    }
}

/// Create a container, starting from an empty mapping when `initial` is `None`.
pub fn create_state(initial: Option<Payload>) -> StateContainer {
    StateContainer::new(initial.unwrap_or_default())
}

impl StateContainer {
    /// Create a container owning `initial`, with default configuration and the system clock.
    pub fn new(initial: Payload) -> Self {
        Self {
            data: initial,
            config: EngineConfig::default(),
            clock: Arc::new(SystemClock),
            history: VecDeque::new(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self.trim_history();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Current payload
    pub fn state(&self) -> &Payload {
        &self.data
    }

    /// Copy of the current payload as a `Value`
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    pub fn into_payload(self) -> Payload {
        self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Retained transition records, oldest first
    pub fn history(&self) -> &VecDeque<TransitionRecord> {
        &self.history
    }

    pub fn last_transition(&self) -> Option<&TransitionRecord> {
        self.history.back()
    }

    /// Replace the payload with `transform(payload)`.
    ///
    /// Returns the container for chaining.
    ///
    /// # Errors
    ///
    /// - `UserFunction` if `transform` fails
    /// - `InvalidTransformResult` if it returns `null` or any other
    ///   non-mapping value
    ///
    /// The payload is unchanged in both cases.
    pub fn self_determine<F>(&mut self, transform: F) -> Result<&mut Self>
    where
        F: FnOnce(&Payload) -> std::result::Result<Value, UserError>,
    {
        log_op_start!("self_determine", field_count = self.data.len());
        let start = Instant::now();

        match self.self_determine_impl(transform) {
            Ok(()) => {
                log_op_end!(
                    "self_determine",
                    started = start,
                    field_count = self.data.len()
                );
                Ok(self)
            }
            Err(e) => {
                log_op_error!("self_determine", &e, started = start);
                Err(e)
            }
        }
    }

    fn self_determine_impl<F>(&mut self, transform: F) -> Result<()>
    where
        F: FnOnce(&Payload) -> std::result::Result<Value, UserError>,
    {
        let produced = transform(&self.data)
            .map_err(|e| TelicError::user_function("self_determine", None, e))?;
        self.data = expect_mapping("self_determine", produced)?;
        Ok(())
    }

    /// Run `purpose` recursively from the current payload and commit the result.
    ///
    /// `max_depth` defaults to the configured bound (10 unless overridden).
    /// `purpose` runs at most `max_depth` times; see [`recursion::evaluate`]
    /// for the termination rules.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `max_depth` is negative (checked before any call)
    /// - `UserFunction` if `purpose` fails at any depth
    /// - `InvalidTransformResult` if the final value is not a mapping
    ///
    /// The payload is unchanged in all cases.
    pub fn teli_recurse<F>(&mut self, purpose: F, max_depth: Option<i64>) -> Result<Value>
    where
        F: FnMut(&Value, u32) -> std::result::Result<Value, UserError>,
    {
        log_op_start!("teli_recurse", max_depth = ?max_depth);
        let start = Instant::now();

        let result = self.teli_recurse_impl(purpose, max_depth).map_err(|e| {
            log_op_error!("teli_recurse", &e, started = start);
            e
        })?;

        log_op_end!(
            "teli_recurse",
            started = start,
            field_count = self.data.len()
        );

        Ok(result)
    }

    fn teli_recurse_impl<F>(&mut self, purpose: F, max_depth: Option<i64>) -> Result<Value>
    where
        F: FnMut(&Value, u32) -> std::result::Result<Value, UserError>,
    {
        let max_depth = match max_depth {
            Some(depth) => MaxDepth::new(depth)?,
            None => self.config.default_max_depth(),
        };

        let seed = self.to_value();
        let evaluation =
            recursion::evaluate(&seed, purpose, max_depth, self.config.fixed_point_exit)?;
        tracing::debug!(
            invocations = evaluation.invocations,
            termination = ?evaluation.termination,
            "recursion finished"
        );

        let payload = expect_mapping("teli_recurse", evaluation.value)?;
        self.data = payload;
        Ok(self.to_value())
    }

    /// Shallow-merge `patch` into the payload and record the transition.
    ///
    /// Fields in `patch` override same-named fields; other fields are kept.
    /// The merge always commits, and the record is appended to the history.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `patch` is not a mapping. Nothing is committed.
    pub fn transition(&mut self, patch: Value) -> Result<TransitionRecord> {
        log_op_start!("transition");
        let start = Instant::now();

        let patch = match patch {
            Value::Object(map) => map,
            other => {
                let e = TelicError::InvalidArgument {
                    op: "transition",
                    argument: "patch",
                    reason: format!("expected a mapping, got {}", type_name(&other)),
                };
                log_op_error!("transition", &e, started = start);
                return Err(e);
            }
        };

        let record = self.transition_fields(&patch);

        log_op_end!(
            "transition",
            started = start,
            transition_id = %record.id(),
            delta_len = record.delta().len()
        );

        Ok(record)
    }

    /// [`transition`](Self::transition) for a patch that is already a mapping.
    pub fn transition_fields(&mut self, patch: &Payload) -> TransitionRecord {
        let previous = self.data.clone();
        let current = shallow_merge(&previous, patch);
        self.data = current.clone();

        let delta = diff_payloads(&previous, &current);
        let record = TransitionRecord {
            id: TransitionId::new(),
            recorded_at: self.clock.now(),
            previous,
            current,
            delta,
        };

        self.remember(record.clone());
        record
    }

    fn remember(&mut self, record: TransitionRecord) {
        if self.config.history_limit == 0 {
            return;
        }
        self.history.push_back(record);
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.config.history_limit {
            self.history.pop_front();
        }
    }
}

fn expect_mapping(op: &'static str, value: Value) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(TelicError::InvalidTransformResult {
            op,
            found: type_name(&other),
        }),
    }
}
