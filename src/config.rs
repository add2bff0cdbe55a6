//! Graph configuration.

use serde::{Deserialize, Serialize};

use crate::combine::CombineRuleKind;
use crate::identity::DEFAULT_ID_PREFIX;
use crate::{Error, Result};

/// What `create` does when an explicit id is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdCollisionPolicy {
    /// Fail with `Error::DuplicateId`; the graph is unchanged.
    #[default]
    Reject,
    /// Replace the existing unit in place. Its `UnitRef` stays valid, so
    /// edges pointing at it now point at the replacement.
    Overwrite,
}

/// Configuration for a `ConceptGraph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Prefix of auto-generated ids.
    pub id_prefix: String,
    pub collision_policy: IdCollisionPolicy,
    /// Rule used by `combine` when none is passed explicitly.
    pub combine_rule: CombineRuleKind,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            collision_policy: IdCollisionPolicy::default(),
            combine_rule: CombineRuleKind::default(),
        }
    }
}

impl GraphConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id_prefix.is_empty() {
            return Err(Error::InvalidConfig("id_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_collision_policy(mut self, policy: IdCollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn with_combine_rule(mut self, rule: CombineRuleKind) -> Self {
        self.combine_rule = rule;
        self
    }
}
