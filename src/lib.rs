//! # concept-graph — Units of Meaning and Their Relations
//!
//! An in-memory graph of concept units: labelled nodes with a scalar value,
//! connected by typed, weighted, directed relations. New units can be
//! derived from two existing ones; the derived unit records where it came
//! from through `component_of` relations.
//!
//! ## Design Principles
//!
//! 1. **Arena, not pointers**: units live in the graph and are addressed by `UnitRef`
//! 2. **Explicit identity**: auto ids come from an `IdAllocator` the graph owns
//! 3. **Fail soft on edges**: a bad relation target is an outcome, never a panic
//! 4. **Pluggable composition**: values combine through a `CombineRule`
//!
//! ## Quick Start
//!
//! ```rust
//! use concept_graph::{CombineOptions, ConceptGraph, NewConcept, COMPONENT_OF};
//!
//! # fn example() -> concept_graph::Result<()> {
//! let mut graph = ConceptGraph::new();
//!
//! let love = graph.create(NewConcept::labelled("love", 10.0))?;
//! let respect = graph.create(NewConcept::labelled("respect", 8.0))?;
//! let _ = graph.add_relation(love, respect, "implies", 0.9);
//!
//! let healthy = graph.combine(
//!     love,
//!     respect,
//!     CombineOptions::new().with_label("healthy_relations"),
//! )?;
//!
//! assert_eq!(graph.unit(healthy).unwrap().value, 18.0);
//! assert_eq!(graph.get_relations(healthy, Some(COMPONENT_OF)).len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod identity;
pub mod combine;
pub mod config;
pub mod graph;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    ConceptUnit, ConceptId, UnitRef,
    Relation, RelationOutcome, Rejection,
    DEFAULT_RELATION_KIND, DEFAULT_WEIGHT, COMPONENT_OF,
};

// ============================================================================
// Re-exports: Graph, identity, composition
// ============================================================================

pub use graph::{ConceptGraph, NewConcept};
pub use identity::{IdAllocator, DEFAULT_ID_PREFIX};
pub use combine::{CombineRule, CombineRuleKind, CombineOptions, Additive, Multiplicative};
pub use config::{GraphConfig, IdCollisionPolicy};
pub use export::{GraphSnapshot, UnitRecord, RelationRecord, export_cypher_dump};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate concept id: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
