//! # Concept Graph Model
//!
//! Plain DTOs shared by the graph, the combination rules and the exporters.
//!
//! Design rule: this module is pure data — no I/O, no id allocation, no logging.

pub mod unit;
pub mod relation;

pub use unit::{ConceptUnit, ConceptId, UnitRef};
pub use relation::{
    Relation, RelationOutcome, Rejection,
    DEFAULT_RELATION_KIND, DEFAULT_WEIGHT, COMPONENT_OF,
};
