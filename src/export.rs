//! Graph export — JSON snapshots and Cypher DUMP scripts.
//!
//! A snapshot is the serde view of a graph: units in creation order, with
//! relation targets written as ids instead of arena refs, plus the auto-id
//! counter. It restores into an equivalent graph.
//!
//! The Cypher dump loads a concept graph into any Neo4j-compatible database:
//!
//! ```text
//! ConceptGraph → export_cypher_dump() → CREATE / MATCH..CREATE statements
//!   → paste into Neo4j Browser, or pipe into cypher-shell
//! ```

use std::io::Write;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GraphConfig;
use crate::graph::{ConceptGraph, NewConcept};
use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// Snapshot
// ============================================================================

/// Serializable image of a whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Counter value the next auto id would use.
    pub next_auto_id: u64,
    pub units: Vec<UnitRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: ConceptId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "real")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub target: ConceptId,
    pub kind: String,
    #[serde(with = "real")]
    pub weight: f64,
}

/// `f64` as a JSON number, or as `"NaN"`, `"inf"`, `"-inf"` when it has no
/// number form.
mod real {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_nan() {
            s.serialize_str("NaN")
        } else if v.is_infinite() {
            s.serialize_str(if v.is_sign_positive() { "inf" } else { "-inf" })
        } else {
            s.serialize_f64(*v)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(t) => match t.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}

impl ConceptGraph {
    pub fn snapshot(&self) -> GraphSnapshot {
        let units = self.units.iter()
            .map(|unit| UnitRecord {
                id: unit.id.clone(),
                label: unit.label.clone(),
                description: unit.description.clone(),
                value: unit.value,
                relations: unit.relations.iter()
                    .map(|rel| RelationRecord {
                        target: self.units[rel.target.0].id.clone(),
                        kind: rel.kind.clone(),
                        weight: rel.weight,
                    })
                    .collect(),
            })
            .collect();

        GraphSnapshot { next_auto_id: self.ids.peek(), units }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Fails with `Error::NotFound` when a relation names an id that is not
    /// in the snapshot. The auto-id counter resumes past both the recorded
    /// counter and every auto-shaped id present.
    pub fn from_snapshot(snapshot: GraphSnapshot, config: GraphConfig) -> Result<Self> {
        let mut graph = ConceptGraph::with_config(config)?;
        let GraphSnapshot { next_auto_id, units } = snapshot;

        // A repeated id (Overwrite policy) keeps only the last record's relations.
        let mut pending: HashMap<UnitRef, Vec<RelationRecord>> = HashMap::with_capacity(units.len());
        for record in units {
            if let Some(n) = graph.ids.sequence_of(record.id.as_str()) {
                graph.ids.advance_past(n);
            }
            let unit = graph.create(NewConcept {
                id: Some(record.id),
                label: record.label,
                description: record.description,
                value: record.value,
            })?;
            pending.insert(unit, record.relations);
        }

        for (source, relations) in pending {
            for rel in relations {
                let target = graph.lookup(rel.target.as_str())
                    .ok_or_else(|| Error::NotFound(format!("Relation target {}", rel.target)))?;
                graph.units[source.0].relations.push(Relation::new(target, rel.kind, rel.weight));
            }
        }

        graph.ids.advance_past(next_auto_id.saturating_sub(1));
        debug!(units = graph.len(), relations = graph.relation_count(), "restored concept graph");
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(text: &str, config: GraphConfig) -> Result<Self> {
        let snapshot: GraphSnapshot = serde_json::from_str(text)?;
        Self::from_snapshot(snapshot, config)
    }
}

// ============================================================================
// Cypher DUMP
// ============================================================================

/// Export a graph as a Cypher DUMP script.
///
/// Every unit becomes a `:Concept` node keyed by its `id` property; every
/// relation becomes a relationship typed by its kind with a `weight` property.
pub fn export_cypher_dump(graph: &ConceptGraph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "// concept-graph Cypher DUMP")?;
    writeln!(writer, "// Units: {}", graph.len())?;
    writeln!(writer, "// Relations: {}", graph.relation_count())?;
    writeln!(writer)?;

    for (_, unit) in graph.units() {
        writeln!(writer, "CREATE (:Concept {{{}}});", format_unit_properties(unit))?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Relations")?;

    for (_, unit) in graph.units() {
        for rel in unit.relations() {
            let Some(target) = graph.unit(rel.target) else { continue };
            writeln!(
                writer,
                "MATCH (a:Concept {{id: {}}}), (b:Concept {{id: {}}}) CREATE (a)-[:{} {{weight: {}}}]->(b);",
                format_string(unit.id.as_str()),
                format_string(target.id.as_str()),
                format_rel_type(&rel.kind),
                format_float(rel.weight),
            )?;
        }
    }

    Ok(())
}

fn format_unit_properties(unit: &ConceptUnit) -> String {
    let mut parts = vec![format!("id: {}", format_string(unit.id.as_str()))];
    if let Some(label) = &unit.label {
        parts.push(format!("label: {}", format_string(label)));
    }
    if let Some(desc) = &unit.description {
        parts.push(format!("description: {}", format_string(desc)));
    }
    parts.push(format!("value: {}", format_float(unit.value)));
    parts.join(", ")
}

/// Single-quoted Cypher string literal.
fn format_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Cypher has no literal for NaN or infinities; those export as null.
fn format_float(f: f64) -> String {
    if f.is_finite() { format!("{f:?}") } else { "null".to_string() }
}

/// Backtick-quoted relationship type, so any kind string is accepted.
fn format_rel_type(kind: &str) -> String {
    format!("`{}`", kind.replace('`', "``"))
}
