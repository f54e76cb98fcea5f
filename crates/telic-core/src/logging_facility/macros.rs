//! Operation boundary macros
//!
//! Every container entry point emits exactly one `start` event and then
//! either one `end` or one `end_error` event. All three carry `component`,
//! `op` and `event`; the closing events also carry `duration_ms`, computed
//! from the `Instant` passed as `started`.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use telic_core::log_op_start;
/// log_op_start!("transition");
/// log_op_start!("self_determine", field_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use telic_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("transition", started = started, delta_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, started = $start:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $start.elapsed().as_millis() as u64
            $(, $($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is borrowed and converted to an `ExError` for its kind, code and
/// recursion depth.
///
/// # Example
///
/// ```
/// # use telic_core::{log_op_error, errors::TelicError};
/// let started = std::time::Instant::now();
/// let err = TelicError::InvalidTransformResult { op: "self_determine", found: "null" };
/// log_op_error!("self_determine", &err, started = started);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, started = $start:expr $(, $($field:tt)*)?) => {{
        let ex_err = $crate::errors::ExError::from($err);
        $crate::__op_event!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $start.elapsed().as_millis() as u64,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.depth = ?ex_err.depth()
            $(, $($field)*)?
        )
    }};
}
