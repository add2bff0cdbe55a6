//! Concept unit — a node in the concept graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::Relation;

/// Maximum number of description characters shown by `Display`.
const DISPLAY_DESCRIPTION_CHARS: usize = 30;

/// String identity of a concept unit (e.g. `"CONCEPT_1"` or a caller-chosen id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(v: &str) -> Self { Self(v.to_owned()) }
}

impl From<String> for ConceptId {
    fn from(v: String) -> Self { Self(v) }
}

impl std::borrow::Borrow<str> for ConceptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Arena index of a unit inside one `ConceptGraph`.
///
/// A `UnitRef` is only meaningful for the graph that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitRef(pub usize);

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit of meaning: a word, a notion or a thought, with a scalar intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptUnit {
    pub id: ConceptId,
    /// The word this unit denotes, if any.
    pub label: Option<String>,
    pub description: Option<String>,
    pub value: f64,
    pub(crate) relations: Vec<Relation>,
}

impl ConceptUnit {
    pub(crate) fn new(id: ConceptId) -> Self {
        Self {
            id,
            label: None,
            description: None,
            value: 0.0,
            relations: Vec::new(),
        }
    }

    /// All outgoing relations, in insertion order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Outgoing relations, optionally restricted to one exact `kind`.
    pub fn get_relations(&self, kind: Option<&str>) -> Vec<&Relation> {
        match kind {
            Some(kind) => self.relations.iter().filter(|r| r.is_kind(kind)).collect(),
            None => self.relations.iter().collect(),
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Label usable in synthesized names: present and non-empty.
    pub(crate) fn naming_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

impl fmt::Display for ConceptUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConceptUnit(id: '{}'", self.id)?;
        if let Some(label) = &self.label {
            write!(f, ", label: '{label}'")?;
        }
        write!(f, ", value: {}", self.value)?;
        if let Some(desc) = &self.description {
            let mut chars = desc.chars();
            let head: String = chars.by_ref().take(DISPLAY_DESCRIPTION_CHARS).collect();
            let ellipsis = if chars.next().is_some() { "..." } else { "" };
            write!(f, ", description: '{head}{ellipsis}'")?;
        }
        write!(f, ")")
    }
}
