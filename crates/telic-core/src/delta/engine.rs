//! Delta computation engine.
//!
//! The core entry point is [`diff`], which walks two structured values and
//! produces a [`Delta`] describing every changed field.

use crate::delta::model::{Delta, FieldChange, FieldPath};
use crate::value::{values_equal, Payload};
use serde_json::Value;
use std::collections::BTreeSet;

/// Compute the structural difference between `before` and `after`.
///
/// Mappings are walked key by key over the sorted union of their keys:
///
/// - key only in `after`: addition `{old: Absent, new}`
/// - key only in `before`: removal `{old, new: Absent}`
/// - key in both, both values mappings: recurse into the sub-mapping
/// - key in both otherwise: one `{old, new}` entry if the values are not
///   structurally equal
///
/// Sequences are compared whole, so any element change yields a single
/// entry for the sequence field. When the roots themselves are not both
/// mappings the result is at most one entry at the root path.
///
/// Recursion only descends where both sides are mappings, so its depth is
/// bounded by the shallower input. `Value` is an owned tree and cannot hold
/// cycles.
pub fn diff(before: &Value, after: &Value) -> Delta {
    let mut delta = Delta::new();
    diff_into(&FieldPath::root(), before, after, &mut delta);
    tracing::debug!(changes = delta.len(), "computed delta");
    delta
}

/// [`diff`] for two mappings.
pub fn diff_payloads(before: &Payload, after: &Payload) -> Delta {
    let mut delta = Delta::new();
    diff_mappings_into(&FieldPath::root(), before, after, &mut delta);
    tracing::debug!(changes = delta.len(), "computed payload delta");
    delta
}

fn diff_into(path: &FieldPath, before: &Value, after: &Value, out: &mut Delta) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => diff_mappings_into(path, b, a, out),
        _ => {
            if !values_equal(before, after) {
                out.insert(
                    path.clone(),
                    FieldChange::modified(before.clone(), after.clone()),
                );
            }
        }
    }
}

fn diff_mappings_into(path: &FieldPath, before: &Payload, after: &Payload, out: &mut Delta) {
    let keys: BTreeSet<&str> = before
        .keys()
        .chain(after.keys())
        .map(String::as_str)
        .collect();

    for key in keys {
        let child = path.child(key);
        match (before.get(key), after.get(key)) {
            (None, Some(new)) => {
                tracing::trace!(path = %child, "field added");
                out.insert(child, FieldChange::added(new.clone()));
            }
            (Some(old), None) => {
                tracing::trace!(path = %child, "field removed");
                out.insert(child, FieldChange::removed(old.clone()));
            }
            (Some(old), Some(new)) => diff_into(&child, old, new, out),
            (None, None) => {}
        }
    }
}
