//! Relation (edge) between concept units.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::UnitRef;

/// Kind used when the caller does not name one.
pub const DEFAULT_RELATION_KIND: &str = "related_to";

/// Weight used when the caller does not supply one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Provenance kind recorded from a combined unit back to each operand.
pub const COMPONENT_OF: &str = "component_of";

/// A directed, typed, weighted edge. Owned by its source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Non-owning reference into the graph arena.
    pub target: UnitRef,
    /// Free-form kind, e.g. `"is_a"`, `"implies"`, `"component_of"`.
    pub kind: String,
    /// Strength of the relation. Any real is accepted.
    pub weight: f64,
}

impl Relation {
    pub fn new(target: UnitRef, kind: impl Into<String>, weight: f64) -> Self {
        Self { target, kind: kind.into(), weight }
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Why `add_relation` refused to append an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The source does not resolve to a unit of this graph.
    UnknownSource(String),
    /// The target does not resolve to a unit of this graph.
    UnknownTarget(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownSource(s) => write!(f, "'{s}' is not a concept unit of this graph (source)"),
            Rejection::UnknownTarget(t) => write!(f, "'{t}' is not a concept unit of this graph (target)"),
        }
    }
}

/// Result of an attempt to add a relation.
///
/// Rejection leaves the graph untouched; callers decide whether it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum RelationOutcome {
    Added,
    Rejected(Rejection),
}

impl RelationOutcome {
    pub fn is_added(&self) -> bool { matches!(self, RelationOutcome::Added) }
    pub fn is_rejected(&self) -> bool { matches!(self, RelationOutcome::Rejected(_)) }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RelationOutcome::Rejected(r) => Some(r),
            RelationOutcome::Added => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let added = RelationOutcome::Added;
        assert!(added.is_added());
        assert_eq!(added.rejection(), None);

        let rejected = RelationOutcome::Rejected(Rejection::UnknownTarget("#42".into()));
        assert!(rejected.is_rejected());
        assert_eq!(
            rejected.rejection().map(ToString::to_string),
            Some("'#42' is not a concept unit of this graph (target)".to_string())
        );
    }
}
