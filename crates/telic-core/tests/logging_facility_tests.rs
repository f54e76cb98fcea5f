//! Boundary logging emitted by container operations.
//!
//! All tests share one global capture, so each asserts on events found by
//! op name and a field unique to the test.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::payload;
use serde_json::json;
use telic_core::logging_facility::test_capture::init_test_capture;
use telic_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DELTA_LEN, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_DEPTH, FIELD_ERR_KIND, FIELD_FIELD_COUNT, FIELD_MAX_DEPTH, FIELD_TRANSITION_ID,
};
use telic_core::{create_state, log_op_end, log_op_error, log_op_start, TelicError};

#[test]
fn test_transition_emits_start_and_end() {
    let capture = init_test_capture();
    let mut state = create_state(Some(payload(json!({"a": 1}))));

    let record = state.transition(json!({"a": 2, "b": 3})).unwrap();

    capture.assert_event_exists("transition", EVENT_START);
    let end = capture
        .events_for("transition")
        .into_iter()
        .find(|e| {
            e.event() == Some(EVENT_END) && e.field(FIELD_TRANSITION_ID) == Some(record.id().as_str())
        })
        .expect("end event for this transition");
    assert_eq!(end.field(FIELD_DELTA_LEN), Some("2"));
    assert!(end.field(FIELD_DURATION_MS).is_some());
    assert_eq!(end.component(), Some("telic_core::container"));
}

#[test]
fn test_boundary_events_carry_size_and_depth_fields() {
    let capture = init_test_capture();
    let mut state = create_state(Some(payload(json!({"seeded": "boundary-fields"}))));

    state
        .self_determine(|_| Ok(json!({"x": 1, "y": 2, "z": 3})))
        .unwrap();
    state
        .teli_recurse(|d, _| Ok(d.clone()), Some(13))
        .unwrap();

    let sized = capture.count_events(|e| {
        e.is("self_determine", EVENT_END) && e.field(FIELD_FIELD_COUNT) == Some("3")
    });
    assert!(sized >= 1);
    let bounded = capture.count_events(|e| {
        e.is("teli_recurse", EVENT_START) && e.field(FIELD_MAX_DEPTH) == Some("Some(13)")
    });
    assert!(bounded >= 1);
}

#[test]
fn test_rejected_transform_emits_end_error_with_code() {
    let capture = init_test_capture();
    let mut state = create_state(None);

    let err = state
        .self_determine(|_| Ok(serde_json::Value::Null))
        .unwrap_err();
    assert!(matches!(err, TelicError::InvalidTransformResult { .. }));

    let found = capture.count_events(|e| {
        e.is("self_determine", EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_INVALID_TRANSFORM_RESULT")
            && e.field(FIELD_ERR_KIND) == Some("InvalidTransformResult")
    });
    assert!(found >= 1);
}

#[test]
fn test_user_failure_logs_depth() {
    let capture = init_test_capture();
    let mut state = create_state(None);

    state
        .teli_recurse(
            |_, depth| {
                if depth == 6 {
                    Err("depth six refused".into())
                } else {
                    Ok(json!({"depth": depth}))
                }
            },
            Some(9),
        )
        .unwrap_err();

    let found = capture.count_events(|e| {
        e.is("teli_recurse", EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_USER_FUNCTION")
            && e.field(FIELD_ERR_DEPTH) == Some("Some(6)")
    });
    assert!(found >= 1);
}

#[test]
fn test_invalid_patch_emits_end_error() {
    let capture = init_test_capture();
    let mut state = create_state(None);
    let before = capture.count_events(|e| e.is("transition", EVENT_END_ERROR));

    state.transition(json!(["not", "a", "mapping"])).unwrap_err();

    let after = capture.count_events(|e| e.is("transition", EVENT_END_ERROR));
    assert!(after > before);
}

#[test]
fn test_macros_directly() {
    let capture = init_test_capture();
    let started = std::time::Instant::now();

    log_op_start!("macro_probe", probe = "direct");
    log_op_end!("macro_probe", started = started, probe = "direct");
    let err = TelicError::InvalidConfig {
        reason: "probe".to_string(),
    };
    log_op_error!("macro_probe", &err, started = started);

    let events = capture.events_for("macro_probe");
    assert!(events.iter().any(|e| e.is("macro_probe", EVENT_START)));
    assert!(events.iter().any(|e| e.is("macro_probe", EVENT_END)));
    let error = capture.last("macro_probe", EVENT_END_ERROR).unwrap();
    assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_INVALID_CONFIG"));
    assert_eq!(error.field(FIELD_ERR_DEPTH), Some("None"));
}
