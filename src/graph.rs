//! The concept graph: unit arena, id index, relations and composition.
//!
//! Units live in an append-only arena and are addressed by `UnitRef`.
//! Each unit owns its outgoing relations; there is no separate edge store.

use std::sync::Arc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::combine::{combined_description, combined_label, CombineOptions, CombineRule};
use crate::config::{GraphConfig, IdCollisionPolicy};
use crate::identity::IdAllocator;
use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// NewConcept
// ============================================================================

/// Parameters for creating a unit. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewConcept {
    pub id: Option<ConceptId>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub value: f64,
}

impl NewConcept {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a labelled unit with an initial value.
    pub fn labelled(label: impl Into<String>, value: f64) -> Self {
        Self::new().with_label(label).with_value(value)
    }

    pub fn with_id(mut self, id: impl Into<ConceptId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }
}

// ============================================================================
// ConceptGraph
// ============================================================================

/// In-memory concept graph.
#[derive(Debug)]
pub struct ConceptGraph {
    pub(crate) config: GraphConfig,
    pub(crate) ids: Arc<IdAllocator>,
    pub(crate) units: Vec<ConceptUnit>,
    pub(crate) index: HashMap<ConceptId, UnitRef>,
}

impl ConceptGraph {
    /// Empty graph with default configuration and its own id sequence.
    pub fn new() -> Self {
        Self::build(GraphConfig::default(), Arc::new(IdAllocator::new()))
    }

    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        let ids = Arc::new(IdAllocator::with_prefix(config.id_prefix.clone())?);
        Ok(Self::build(config, ids))
    }

    /// Graph drawing auto ids from a shared allocator.
    ///
    /// The allocator's prefix takes precedence over `config.id_prefix`.
    pub fn with_allocator(config: GraphConfig, ids: Arc<IdAllocator>) -> Self {
        let config = GraphConfig { id_prefix: ids.prefix().to_string(), ..config };
        Self::build(config, ids)
    }

    fn build(config: GraphConfig, ids: Arc<IdAllocator>) -> Self {
        Self {
            config,
            ids,
            units: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn allocator(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    // ========================================================================
    // Units
    // ========================================================================

    /// Create a unit. Auto-assigns an id when `draft.id` is `None`.
    pub fn create(&mut self, draft: NewConcept) -> Result<UnitRef> {
        let NewConcept { id, label, description, value } = draft;
        let id = match id {
            Some(id) => id,
            None => self.next_free_id(),
        };

        let mut unit = ConceptUnit::new(id);
        unit.label = label;
        unit.description = description;
        unit.value = value;

        if let Some(&existing) = self.index.get(&unit.id) {
            return match self.config.collision_policy {
                IdCollisionPolicy::Reject => Err(Error::DuplicateId(unit.id.0)),
                IdCollisionPolicy::Overwrite => {
                    warn!(id = %unit.id, unit = %existing, "overwriting concept unit with duplicate id");
                    self.units[existing.0] = unit;
                    Ok(existing)
                }
            };
        }

        let unit_ref = UnitRef(self.units.len());
        debug!(id = %unit.id, unit = %unit_ref, value = unit.value, "created concept unit");
        self.index.insert(unit.id.clone(), unit_ref);
        self.units.push(unit);
        Ok(unit_ref)
    }

    /// Skip numbers whose id an explicit unit already took.
    fn next_free_id(&self) -> ConceptId {
        loop {
            let id = self.ids.allocate();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn unit(&self, unit: UnitRef) -> Option<&ConceptUnit> {
        self.units.get(unit.0)
    }

    /// Unit by string id.
    pub fn get(&self, id: &str) -> Option<&ConceptUnit> {
        self.lookup(id).and_then(|r| self.unit(r))
    }

    pub fn lookup(&self, id: &str) -> Option<UnitRef> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, unit: UnitRef) -> bool {
        unit.0 < self.units.len()
    }

    /// All units in creation order.
    pub fn units(&self) -> impl Iterator<Item = (UnitRef, &ConceptUnit)> {
        self.units.iter().enumerate().map(|(i, u)| (UnitRef(i), u))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Append a relation `source -[kind, weight]-> target`.
    ///
    /// Never fails: an unresolvable endpoint leaves the graph untouched and
    /// is reported as `RelationOutcome::Rejected`.
    pub fn add_relation(
        &mut self,
        source: UnitRef,
        target: UnitRef,
        kind: impl Into<String>,
        weight: f64,
    ) -> RelationOutcome {
        if !self.contains(target) {
            return reject(Rejection::UnknownTarget(target.to_string()));
        }
        let Some(unit) = self.units.get_mut(source.0) else {
            return reject(Rejection::UnknownSource(source.to_string()));
        };
        unit.relations.push(Relation::new(target, kind, weight));
        RelationOutcome::Added
    }

    /// `add_relation` with the default kind and weight.
    pub fn relate(&mut self, source: UnitRef, target: UnitRef) -> RelationOutcome {
        self.add_relation(source, target, DEFAULT_RELATION_KIND, DEFAULT_WEIGHT)
    }

    /// `add_relation` addressed by string ids.
    pub fn relate_by_id(
        &mut self,
        source: &str,
        target: &str,
        kind: impl Into<String>,
        weight: f64,
    ) -> RelationOutcome {
        let Some(target) = self.lookup(target) else {
            return reject(Rejection::UnknownTarget(target.to_string()));
        };
        let Some(source) = self.lookup(source) else {
            return reject(Rejection::UnknownSource(source.to_string()));
        };
        self.add_relation(source, target, kind, weight)
    }

    /// Outgoing relations of `unit`, optionally of one `kind`.
    /// Empty when `unit` is not in this graph.
    pub fn get_relations(&self, unit: UnitRef, kind: Option<&str>) -> Vec<&Relation> {
        self.unit(unit).map(|u| u.get_relations(kind)).unwrap_or_default()
    }

    pub fn relation_count(&self) -> usize {
        self.units.iter().map(|u| u.relations.len()).sum()
    }

    /// Distinct relation kinds in use, sorted.
    pub fn relation_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.units.iter()
            .flat_map(|u| u.relations.iter().map(|r| r.kind.clone()))
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Derive a new unit from `a` and `b` using the configured rule.
    pub fn combine(&mut self, a: UnitRef, b: UnitRef, options: CombineOptions) -> Result<UnitRef> {
        let rule = self.config.combine_rule.rule();
        self.combine_with(a, b, options, rule)
    }

    /// Derive a new unit from `a` and `b` with an explicit value rule.
    ///
    /// The new unit always gets an auto id and carries two `component_of`
    /// relations, to `a` then to `b`, weighted by each operand's own value.
    /// Operands are not modified.
    pub fn combine_with(
        &mut self,
        a: UnitRef,
        b: UnitRef,
        options: CombineOptions,
        rule: &dyn CombineRule,
    ) -> Result<UnitRef> {
        let unit_a = self.unit(a).ok_or_else(|| Error::NotFound(format!("Concept unit {a}")))?;
        let unit_b = self.unit(b).ok_or_else(|| Error::NotFound(format!("Concept unit {b}")))?;

        let (weight_a, weight_b) = (unit_a.value, unit_b.value);
        let draft = NewConcept {
            id: None,
            label: non_empty(options.label).or_else(|| combined_label(unit_a, unit_b)),
            description: Some(
                non_empty(options.description)
                    .unwrap_or_else(|| combined_description(unit_a, unit_b)),
            ),
            value: rule.combine(weight_a, weight_b),
        };

        let derived = self.create(draft)?;
        let unit = &mut self.units[derived.0];
        unit.relations.push(Relation::new(a, COMPONENT_OF, weight_a));
        unit.relations.push(Relation::new(b, COMPONENT_OF, weight_b));

        debug!(
            id = %unit.id,
            rule = rule.name(),
            value = unit.value,
            "combined concept units {} and {}", a, b
        );
        Ok(derived)
    }

    /// Units `unit` was combined from, in provenance order.
    pub fn components(&self, unit: UnitRef) -> SmallVec<[&ConceptUnit; 2]> {
        self.get_relations(unit, Some(COMPONENT_OF))
            .into_iter()
            .filter_map(|r| self.unit(r.target))
            .collect()
    }
}

impl Default for ConceptGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// An empty override counts as no override.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn reject(rejection: Rejection) -> RelationOutcome {
    warn!(%rejection, "relation not added");
    RelationOutcome::Rejected(rejection)
}

// ============================================================================
// Tests
// ============================================================================
