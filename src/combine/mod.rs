//! # Combination rules
//!
//! A combination derives a new unit from two operands. The graph owns the
//! provenance bookkeeping; this module owns the two pluggable pieces:
//!
//! - the value rule (`CombineRule`), and
//! - the naming of the derived unit (label and description synthesis).

use serde::{Deserialize, Serialize};
use crate::model::ConceptUnit;

/// Turns two operand values into the value of the derived unit.
pub trait CombineRule {
    fn combine(&self, a: f64, b: f64) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

/// `a + b`. The default rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Additive;

impl CombineRule for Additive {
    fn combine(&self, a: f64, b: f64) -> f64 { a + b }
    fn name(&self) -> &str { "additive" }
}

/// `a * b` — synergy between operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Multiplicative;

impl CombineRule for Multiplicative {
    fn combine(&self, a: f64, b: f64) -> f64 { a * b }
    fn name(&self) -> &str { "multiplicative" }
}

impl<F> CombineRule for F
where
    F: Fn(f64, f64) -> f64,
{
    fn combine(&self, a: f64, b: f64) -> f64 {
        self(a, b)
    }
}

/// Built-in rules selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineRuleKind {
    #[default]
    Additive,
    Multiplicative,
}

impl CombineRuleKind {
    pub fn rule(self) -> &'static dyn CombineRule {
        match self {
            CombineRuleKind::Additive => &Additive,
            CombineRuleKind::Multiplicative => &Multiplicative,
        }
    }
}

/// Caller overrides for the derived unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombineOptions {
    pub label: Option<String>,
    pub description: Option<String>,
}

impl CombineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `"{a}_{b}_combined"` when both operands carry a non-empty label.
pub fn combined_label(a: &ConceptUnit, b: &ConceptUnit) -> Option<String> {
    Some(format!("{}_{}_combined", a.naming_label()?, b.naming_label()?))
}

/// `"Combination of: (..) and (..)"`; an absent description renders empty.
pub fn combined_description(a: &ConceptUnit, b: &ConceptUnit) -> String {
    format!(
        "Combination of: ({}) and ({})",
        a.description.as_deref().unwrap_or_default(),
        b.description.as_deref().unwrap_or_default(),
    )
}
