use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use telic_core::{FixedClock, Payload, StateContainer};

/// Convert a `json!` mapping literal into a payload
///
/// # Panics
///
/// Panics if `value` is not a mapping.
#[allow(dead_code)]
pub fn payload(value: Value) -> Payload {
    value
        .as_object()
        .cloned()
        .expect("test payload must be a JSON object")
}

/// Instant used by pinned-clock containers
#[allow(dead_code)]
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

/// Create a container with a pinned clock for deterministic records
#[allow(dead_code)]
pub fn pinned_container(value: Value) -> StateContainer {
    StateContainer::new(payload(value)).with_clock(FixedClock::new(fixed_instant()))
}
