//! End-to-end tests for unit construction, identity and relations.
//!
//! Each test builds a fresh `ConceptGraph`, so auto ids always start at 1.

use concept_graph::{
    ConceptGraph, GraphConfig, IdAllocator, NewConcept, RelationOutcome, Rejection, UnitRef,
    DEFAULT_RELATION_KIND,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// ============================================================================
// 1. Auto ids are CONCEPT_1, CONCEPT_2, ... regardless of explicit ids
// ============================================================================

#[test]
fn test_auto_id_monotonicity() {
    let mut graph = ConceptGraph::new();

    let first = graph.create(NewConcept::labelled("abstraction", 0.0)).unwrap();
    graph.create(NewConcept::new().with_id("philosophy")).unwrap();
    graph.create(NewConcept::new().with_id("ethics")).unwrap();
    let second = graph.create(NewConcept::labelled("logic", 0.0)).unwrap();
    let third = graph.create(NewConcept::new()).unwrap();

    let ids: Vec<&str> = [first, second, third]
        .iter()
        .map(|r| graph.unit(*r).unwrap().id.as_str())
        .collect();
    assert_eq!(ids, vec!["CONCEPT_1", "CONCEPT_2", "CONCEPT_3"]);
}

// ============================================================================
// 2. Construction defaults
// ============================================================================

#[test]
fn test_construction_defaults() {
    let mut graph = ConceptGraph::new();
    let unit = graph.create(NewConcept::new()).unwrap();
    let unit = graph.unit(unit).unwrap();

    assert_eq!(unit.label, None);
    assert_eq!(unit.description, None);
    assert_eq!(unit.value, 0.0);
    assert!(unit.relations().is_empty());
}

#[test]
fn test_explicit_id_used_verbatim() {
    let mut graph = ConceptGraph::new();
    let r = graph
        .create(
            NewConcept::labelled("love", 10.0)
                .with_id("love-01")
                .with_description("deep feeling of attachment"),
        )
        .unwrap();

    assert_eq!(graph.lookup("love-01"), Some(r));
    let unit = graph.get("love-01").unwrap();
    assert_eq!(unit.description.as_deref(), Some("deep feeling of attachment"));
    assert_eq!(graph.allocator().peek(), 1);
}

// ============================================================================
// 3. Relations are append-only
// ============================================================================

#[test]
fn test_relation_append_only() {
    let mut graph = ConceptGraph::new();
    let a = graph.create(NewConcept::new()).unwrap();
    let b = graph.create(NewConcept::new()).unwrap();

    for _ in 0..3 {
        assert_eq!(graph.add_relation(a, b, "supports", 0.8), RelationOutcome::Added);
    }

    let rels = graph.get_relations(a, None);
    assert_eq!(rels.len(), 3);
    assert!(rels.iter().all(|r| r.target == b && r.kind == "supports" && r.weight == 0.8));
}

#[test]
fn test_weights_are_unrestricted() {
    let mut graph = ConceptGraph::new();
    let a = graph.create(NewConcept::new()).unwrap();
    let b = graph.create(NewConcept::new()).unwrap();

    let _ = graph.add_relation(a, b, "contradicts", -3.5);
    let _ = graph.add_relation(a, b, "amplifies", 42.0);

    let weights: Vec<f64> = graph.get_relations(a, None).iter().map(|r| r.weight).collect();
    assert_eq!(weights, vec![-3.5, 42.0]);
}

#[test]
fn test_self_relation_allowed() {
    let mut graph = ConceptGraph::new();
    let a = graph.create(NewConcept::new()).unwrap();
    assert!(graph.relate(a, a).is_added());
    assert_eq!(graph.get_relations(a, Some(DEFAULT_RELATION_KIND))[0].target, a);
}

// ============================================================================
// 4. Invalid targets are a no-op with an explicit outcome
// ============================================================================

#[test]
fn test_invalid_target_noop() {
    let mut graph = ConceptGraph::new();
    let a = graph.create(NewConcept::new()).unwrap();
    let b = graph.create(NewConcept::new()).unwrap();
    let _ = graph.relate(a, b);

    let outcome = graph.add_relation(a, UnitRef(42), "related_to", 1.0);

    assert_eq!(outcome, RelationOutcome::Rejected(Rejection::UnknownTarget("#42".into())));
    assert_eq!(graph.get_relations(a, None).len(), 1);
}

#[test]
fn test_ref_from_another_graph_is_rejected() {
    let mut small = ConceptGraph::new();
    let mut big = ConceptGraph::new();
    let a = small.create(NewConcept::new()).unwrap();
    for _ in 0..5 {
        big.create(NewConcept::new()).unwrap();
    }
    let foreign = big.lookup("CONCEPT_5").unwrap();

    assert!(small.add_relation(a, foreign, "related_to", 1.0).is_rejected());
    assert_eq!(small.relation_count(), 0);
}

// ============================================================================
// 5. Filtering by kind
// ============================================================================

#[test]
fn test_filter_correctness() {
    let mut graph = ConceptGraph::new();
    let src = graph.create(NewConcept::new()).unwrap();
    let t1 = graph.create(NewConcept::new()).unwrap();
    let t2 = graph.create(NewConcept::new()).unwrap();
    let t3 = graph.create(NewConcept::new()).unwrap();

    let _ = graph.add_relation(src, t1, "a", 1.0);
    let _ = graph.add_relation(src, t2, "b", 2.0);
    let _ = graph.add_relation(src, t3, "a", 3.0);

    let a: Vec<UnitRef> = graph.get_relations(src, Some("a")).iter().map(|r| r.target).collect();
    assert_eq!(a, vec![t1, t3]);
    assert!(graph.get_relations(src, Some("c")).is_empty());

    let all: Vec<&str> = graph.get_relations(src, None).iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(all, vec!["a", "b", "a"]);
}

#[test]
fn test_relations_not_mirrored() {
    let mut graph = ConceptGraph::new();
    let love = graph.create(NewConcept::labelled("love", 10.0)).unwrap();
    let respect = graph.create(NewConcept::labelled("respect", 8.0)).unwrap();

    let _ = graph.add_relation(love, respect, "implies", 0.9);

    assert_eq!(graph.get_relations(love, Some("implies")).len(), 1);
    assert!(graph.get_relations(respect, None).is_empty());
}

// ============================================================================
// 6. Shared allocator across graphs
// ============================================================================

#[test]
fn test_shared_allocator_keeps_ids_unique() {
    let ids = Arc::new(IdAllocator::new());
    let mut left = ConceptGraph::with_allocator(GraphConfig::default(), Arc::clone(&ids));
    let mut right = ConceptGraph::with_allocator(GraphConfig::default(), Arc::clone(&ids));

    let l = left.create(NewConcept::new()).unwrap();
    let r = right.create(NewConcept::new()).unwrap();

    assert_eq!(left.unit(l).unwrap().id.as_str(), "CONCEPT_1");
    assert_eq!(right.unit(r).unwrap().id.as_str(), "CONCEPT_2");
    assert_eq!(ids.peek(), 3);
}

#[test]
fn test_custom_prefix() {
    let config = GraphConfig::default().with_id_prefix("IDEA_");
    let mut graph = ConceptGraph::with_config(config).unwrap();
    let r = graph.create(NewConcept::new()).unwrap();
    assert_eq!(graph.unit(r).unwrap().id.as_str(), "IDEA_1");
}
