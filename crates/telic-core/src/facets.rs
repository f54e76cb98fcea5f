//! Free-standing helpers that work without a caller-owned container.

use serde_json::{json, Map, Value};

use crate::container::{StateContainer, TransitionRecord};
use crate::errors::Result;
use crate::value::{shallow_merge, Payload};

/// Spatial, temporal and informational views of one thing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConspansiveDuality {
    spatial: Payload,
    temporal: Payload,
    informational: Payload,
}

/// Group three component mappings; missing components are empty.
pub fn conspansive_duality(
    spatial: Option<Payload>,
    temporal: Option<Payload>,
    informational: Option<Payload>,
) -> ConspansiveDuality {
    ConspansiveDuality {
        spatial: spatial.unwrap_or_default(),
        temporal: temporal.unwrap_or_default(),
        informational: informational.unwrap_or_default(),
    }
}

impl ConspansiveDuality {
    pub fn spatial(&self) -> &Payload {
        &self.spatial
    }

    pub fn temporal(&self) -> &Payload {
        &self.temporal
    }

    pub fn informational(&self) -> &Payload {
        &self.informational
    }

    /// Merge the components into one mapping.
    ///
    /// Applied in the order spatial, temporal, informational; on a key clash
    /// the later component wins.
    pub fn unified(&self) -> Payload {
        let merged = shallow_merge(&self.spatial, &self.temporal);
        shallow_merge(&merged, &self.informational)
    }
}

/// A syntax/semantics pair whose changes are tracked as transitions.
///
/// Backed by a [`StateContainer`] holding `{"syntax": .., "semantics": ..}`.
#[derive(Debug, Clone)]
pub struct SyntacticSemantic {
    state: StateContainer,
}

/// Seed a syntax/semantics pair; missing sides start as empty mappings.
pub fn syntactic_semantic(syntax: Option<Value>, semantics: Option<Value>) -> SyntacticSemantic {
    let mut seed = Map::new();
    seed.insert("syntax".to_string(), syntax.unwrap_or_else(|| json!({})));
    seed.insert("semantics".to_string(), semantics.unwrap_or_else(|| json!({})));
    SyntacticSemantic {
        state: StateContainer::new(seed),
    }
}

impl SyntacticSemantic {
    pub fn syntax(&self) -> Option<&Value> {
        self.state.state().get("syntax")
    }

    pub fn semantics(&self) -> Option<&Value> {
        self.state.state().get("semantics")
    }

    pub fn state(&self) -> &StateContainer {
        &self.state
    }

    /// Same contract as [`StateContainer::transition`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `patch` is not a mapping.
    pub fn transition(&mut self, patch: Value) -> Result<TransitionRecord> {
        self.state.transition(patch)
    }
}

/// Hand `elements` to `organize` and return its result.
///
/// `elements` is only borrowed, so it cannot be reordered in place.
pub fn self_organize<T, R, F>(elements: &[T], organize: F) -> R
where
    F: FnOnce(&[T]) -> R,
{
    organize(elements)
}
