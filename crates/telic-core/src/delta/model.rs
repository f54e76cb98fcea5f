//! Delta output types.
//!
//! Collections use `BTreeMap` for deterministic iteration and serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Location of a field inside a structured value.
///
/// Stored as key segments so that keys containing `.` stay unambiguous;
/// the dotted form is for display and lookup convenience only. The root
/// path has no segments and renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The path of the value itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Extend this path by one key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (nesting depth of the field).
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Parses the dotted form; `""` is the root path.
impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        if dotted.is_empty() {
            Self::root()
        } else {
            Self::from_segments(dotted.split('.'))
        }
    }
}

/// One side of a change: the field's value, or the marker for a field that
/// does not exist on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Slot {
    Absent,
    Present(Value),
}

impl Slot {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Slot::Absent => None,
            Slot::Present(v) => Some(v),
        }
    }
}

impl From<Option<Value>> for Slot {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Slot::Absent, Slot::Present)
    }
}

/// Classification of a single field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// Old/new values for a changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Value before the change
    pub old: Slot,
    /// Value after the change
    pub new: Slot,
}

impl FieldChange {
    pub fn added(new: Value) -> Self {
        Self {
            old: Slot::Absent,
            new: Slot::Present(new),
        }
    }

    pub fn removed(old: Value) -> Self {
        Self {
            old: Slot::Present(old),
            new: Slot::Absent,
        }
    }

    pub fn modified(old: Value, new: Value) -> Self {
        Self {
            old: Slot::Present(old),
            new: Slot::Present(new),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match (&self.old, &self.new) {
            (Slot::Absent, _) => ChangeKind::Added,
            (_, Slot::Absent) => ChangeKind::Removed,
            _ => ChangeKind::Modified,
        }
    }

    /// The same change seen in the opposite direction.
    pub fn inverted(&self) -> Self {
        Self {
            old: self.new.clone(),
            new: self.old.clone(),
        }
    }
}

/// Mapping from field path to the change recorded at that path.
///
/// Serialized as a list of `{path, old, new}` entries ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<DeltaEntry>", from = "Vec<DeltaEntry>")]
pub struct Delta {
    changes: BTreeMap<FieldPath, FieldChange>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: FieldPath, change: FieldChange) {
        self.changes.insert(path, change);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldChange> {
        self.changes.get(path)
    }

    /// Look up a change by its dotted path, e.g. `"profile.name"`.
    pub fn get_dotted(&self, dotted: &str) -> Option<&FieldChange> {
        self.changes.get(&FieldPath::from(dotted))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldChange)> {
        self.changes.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.changes.keys()
    }

    /// Number of changes of the given kind.
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.values().filter(|c| c.kind() == kind).count()
    }

    /// The delta that undoes this one: every `{old, new}` becomes `{new, old}`.
    ///
    /// `diff(b, a)` equals `diff(a, b).inverted()`.
    pub fn inverted(&self) -> Self {
        Self {
            changes: self
                .changes
                .iter()
                .map(|(path, change)| (path.clone(), change.inverted()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Delta {
    type Item = (&'a FieldPath, &'a FieldChange);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldPath, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Serialized form of one delta entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaEntry {
    pub path: FieldPath,
    pub old: Slot,
    pub new: Slot,
}

impl From<Delta> for Vec<DeltaEntry> {
    fn from(delta: Delta) -> Self {
        delta
            .changes
            .into_iter()
            .map(|(path, change)| DeltaEntry {
                path,
                old: change.old,
                new: change.new,
            })
            .collect()
    }
}

impl From<Vec<DeltaEntry>> for Delta {
    fn from(entries: Vec<DeltaEntry>) -> Self {
        Self {
            changes: entries
                .into_iter()
                .map(|e| (e.path, FieldChange { old: e.old, new: e.new }))
                .collect(),
        }
    }
}
