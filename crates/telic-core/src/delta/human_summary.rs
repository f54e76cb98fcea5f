//! Human-readable summary renderer for deltas.

use crate::delta::model::{ChangeKind, Delta, FieldPath};
use serde_json::Value;

/// Render a human-readable Markdown summary of a [`Delta`].
///
/// Informational only; the structured delta is the source of truth.
pub fn render_delta_summary(delta: &Delta) -> String {
    let mut out = String::new();

    out.push_str("## State Delta\n\n");

    if delta.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Changes**: {} ({} added, {} removed, {} modified)\n\n",
        delta.len(),
        delta.count(ChangeKind::Added),
        delta.count(ChangeKind::Removed),
        delta.count(ChangeKind::Modified),
    ));

    for (path, change) in delta {
        let line = match change.kind() {
            ChangeKind::Added => format!("- `+ {}`: {}", label(path), show(change.new.value())),
            ChangeKind::Removed => {
                format!("- `- {}`: {}", label(path), show(change.old.value()))
            }
            ChangeKind::Modified => format!(
                "- `~ {}`: {} -> {}",
                label(path),
                show(change.old.value()),
                show(change.new.value())
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn label(path: &FieldPath) -> String {
    if path.is_root() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn show(value: Option<&Value>) -> String {
    value.map_or_else(|| "<absent>".to_string(), Value::to_string)
}
