//! End-to-end container scenarios: transitions, self-determination and
//! bounded recursion through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixed_instant, payload, pinned_container};
use serde_json::{json, Value};
use telic_core::{
    create_state, diff, shallow_merge, EngineConfig, FieldChange, Slot, StateContainer,
    TelicError,
};

// ---------------------------------------------------------------------------
// transition
// ---------------------------------------------------------------------------

#[test]
fn test_transition_records_previous_current_and_delta() {
    let mut state = create_state(Some(payload(json!({"a": 1, "b": 2}))));

    let record = state.transition(json!({"b": 3, "c": 4})).unwrap();

    assert_eq!(Value::Object(record.previous().clone()), json!({"a": 1, "b": 2}));
    assert_eq!(
        Value::Object(record.current().clone()),
        json!({"a": 1, "b": 3, "c": 4})
    );
    assert_eq!(record.delta().len(), 2);
    assert_eq!(
        record.delta().get_dotted("b"),
        Some(&FieldChange::modified(json!(2), json!(3)))
    );
    let c = record.delta().get_dotted("c").unwrap();
    assert_eq!(c.old, Slot::Absent);
    assert_eq!(c.new, Slot::Present(json!(4)));
}

#[test]
fn test_transition_commits_shallow_merge() {
    let mut state = create_state(Some(payload(json!({"a": 1, "nested": {"x": 1, "y": 2}}))));
    let patch = payload(json!({"nested": {"x": 5}}));
    let before = state.state().clone();

    let record = state.transition(Value::Object(patch.clone())).unwrap();

    assert_eq!(state.state(), &shallow_merge(&before, &patch));
    // nested mappings are replaced, not merged
    assert_eq!(state.to_value(), json!({"a": 1, "nested": {"x": 5}}));
    assert_eq!(
        record.delta(),
        &diff(
            &Value::Object(before),
            &Value::Object(record.current().clone())
        )
    );
    let paths: Vec<String> = record.delta().paths().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["nested.x", "nested.y"]);
}

#[test]
fn test_empty_patch_records_empty_delta() {
    let mut state = create_state(Some(payload(json!({"a": 1}))));

    let record = state.transition(json!({})).unwrap();

    assert!(record.delta().is_empty());
    assert_eq!(record.previous(), record.current());
    assert_eq!(state.history().len(), 1);
}

#[test]
fn test_records_are_not_affected_by_later_mutation() {
    let mut state = pinned_container(json!({"count": 0}));

    let first = state.transition(json!({"count": 1})).unwrap();
    state.transition(json!({"count": 2, "extra": true})).unwrap();
    state
        .self_determine(|_| Ok(json!({"replaced": true})))
        .unwrap();

    assert_eq!(Value::Object(first.current().clone()), json!({"count": 1}));
    assert_eq!(
        Value::Object(state.history()[0].current().clone()),
        json!({"count": 1})
    );
    assert_eq!(first.recorded_at(), fixed_instant());
}

#[test]
fn test_each_transition_gets_distinct_id() {
    let mut state = create_state(None);

    let a = state.transition(json!({"a": 1})).unwrap();
    let b = state.transition(json!({"a": 2})).unwrap();

    assert_ne!(a.id(), b.id());
    assert_eq!(state.last_transition().unwrap().id(), b.id());
}

#[test]
fn test_transition_record_serializes() {
    let mut state = pinned_container(json!({"a": 1}));
    let record = state.transition(json!({"a": 2})).unwrap();

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["previous"], json!({"a": 1}));
    assert_eq!(json["current"], json!({"a": 2}));
    assert_eq!(json["delta"][0]["path"], json!(["a"]));
    assert_eq!(json["delta"][0]["old"], json!({"state": "present", "value": 1}));
}

// ---------------------------------------------------------------------------
// self_determine
// ---------------------------------------------------------------------------

#[test]
fn test_self_determine_replaces_payload() {
    let mut state = create_state(Some(payload(json!({"first": "ada", "last": "lovelace"}))));

    state
        .self_determine(|d| {
            let first = d["first"].as_str().unwrap_or_default();
            let last = d["last"].as_str().unwrap_or_default();
            Ok(json!({"full": format!("{first} {last}")}))
        })
        .unwrap();

    assert_eq!(state.to_value(), json!({"full": "ada lovelace"}));
}

#[test]
fn test_self_determine_failure_leaves_state_unchanged() {
    let mut state = create_state(Some(payload(json!({"a": 1}))));
    let before = state.state().clone();

    let err = state
        .self_determine(|_| Err("transform refused".into()))
        .unwrap_err();

    assert!(matches!(err, TelicError::UserFunction { op: "self_determine", .. }));
    assert_eq!(state.state(), &before);
}

#[test]
fn test_self_determine_rejects_non_mapping() {
    let mut state = create_state(Some(payload(json!({"a": 1}))));

    let err = state.self_determine(|_| Ok(json!([1, 2, 3]))).unwrap_err();

    assert!(matches!(
        err,
        TelicError::InvalidTransformResult {
            found: "sequence",
            ..
        }
    ));
    assert_eq!(state.to_value(), json!({"a": 1}));
}

#[test]
fn test_self_determine_does_not_record_history() {
    let mut state = create_state(None);
    state.self_determine(|_| Ok(json!({"a": 1}))).unwrap();
    assert!(state.history().is_empty());
}

// ---------------------------------------------------------------------------
// teli_recurse
// ---------------------------------------------------------------------------

#[test]
fn test_teli_recurse_last_write_wins() {
    let mut state = create_state(None);
    let mut invocations = 0;

    let result = state
        .teli_recurse(
            |d, depth| {
                invocations += 1;
                let mut next = d.as_object().cloned().unwrap_or_default();
                next.insert("level".to_string(), json!(depth));
                Ok(Value::Object(next))
            },
            Some(5),
        )
        .unwrap();

    assert_eq!(result, json!({"level": 4}));
    assert_eq!(invocations, 5);
    assert_eq!(state.to_value(), json!({"level": 4}));
}

#[test]
fn test_teli_recurse_default_depth_is_ten() {
    let mut state = create_state(Some(payload(json!({"n": 0}))));

    let result = state
        .teli_recurse(
            |d, _| Ok(json!({"n": d["n"].as_i64().unwrap_or(0) + 1})),
            None,
        )
        .unwrap();

    assert_eq!(result, json!({"n": 10}));
}

#[test]
fn test_teli_recurse_zero_depth_keeps_payload() {
    let mut state = create_state(Some(payload(json!({"a": 1}))));

    let result = state
        .teli_recurse(|_, _| Ok(json!({"never": true})), Some(0))
        .unwrap();

    assert_eq!(result, json!({"a": 1}));
    assert_eq!(state.to_value(), json!({"a": 1}));
}

#[test]
fn test_teli_recurse_error_midway_leaves_state_unchanged() {
    let mut state = create_state(Some(payload(json!({"n": 0}))));

    let err = state
        .teli_recurse(
            |d, depth| {
                if depth == 3 {
                    return Err("diverged".into());
                }
                Ok(json!({"n": d["n"].as_i64().unwrap_or(0) + 1}))
            },
            Some(10),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        TelicError::UserFunction {
            op: "teli_recurse",
            depth: Some(3),
            ..
        }
    ));
    assert_eq!(state.to_value(), json!({"n": 0}));
}

#[test]
fn test_teli_recurse_non_mapping_result_rejected() {
    let mut state = create_state(Some(payload(json!({"a": 1}))));

    let err = state
        .teli_recurse(|_, depth| Ok(json!(depth)), Some(2))
        .unwrap_err();

    assert!(matches!(
        err,
        TelicError::InvalidTransformResult {
            op: "teli_recurse",
            found: "number"
        }
    ));
    assert_eq!(state.to_value(), json!({"a": 1}));
}

#[test]
fn test_teli_recurse_intermediate_values_need_not_be_mappings() {
    let mut state = create_state(None);

    let result = state
        .teli_recurse(
            |d, depth| {
                Ok(match depth {
                    0 => json!("scratch"),
                    _ => json!({"from": d.clone()}),
                })
            },
            Some(2),
        )
        .unwrap();

    assert_eq!(result, json!({"from": "scratch"}));
}

#[test]
fn test_teli_recurse_depth_dependent_purpose_runs_to_limit() {
    let mut state = create_state(None);
    let mut calls = 0;

    let result = state
        .teli_recurse(
            |d, depth| {
                calls += 1;
                if depth == 0 {
                    return Ok(d.clone());
                }
                let mut next = d.as_object().cloned().unwrap_or_default();
                next.insert("level".to_string(), json!(depth));
                Ok(Value::Object(next))
            },
            Some(5),
        )
        .unwrap();

    assert_eq!(result, json!({"level": 4}));
    assert_eq!(calls, 5);
}

#[test]
fn test_fixed_point_exit_off_by_default() {
    let mut calls = 0;
    let mut state = create_state(Some(payload(json!({"stable": true}))));

    state
        .teli_recurse(
            |d, _| {
                calls += 1;
                Ok(d.clone())
            },
            Some(4),
        )
        .unwrap();

    assert_eq!(calls, 4);
}

#[test]
fn test_fixed_point_exit_stops_early_when_enabled() {
    let mut calls = 0;
    let mut state = StateContainer::new(payload(json!({"stable": true})))
        .with_config(EngineConfig::default().with_fixed_point_exit(true));

    state
        .teli_recurse(
            |d, _| {
                calls += 1;
                Ok(d.clone())
            },
            Some(4),
        )
        .unwrap();

    assert_eq!(calls, 1);
}
