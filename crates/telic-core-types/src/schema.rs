//! Field keys and event names used by telic's structured log events

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// State engine context
pub const FIELD_TRANSITION_ID: &str = "transition_id";
pub const FIELD_MAX_DEPTH: &str = "max_depth";

// Collection sizes
pub const FIELD_DELTA_LEN: &str = "delta_len";
pub const FIELD_FIELD_COUNT: &str = "field_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_DEPTH: &str = "err.depth";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
