//! Identity allocation for concept units.
//!
//! Auto ids have the shape `{prefix}{n}` with `n` drawn from a monotonically
//! increasing counter starting at 1. The counter is an explicit object rather
//! than global state: each graph owns one, and graphs that should share a
//! sequence share the same `Arc<IdAllocator>`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::ConceptId;
use crate::{Error, Result};

/// Prefix of auto-generated ids.
pub const DEFAULT_ID_PREFIX: &str = "CONCEPT_";

/// Monotonic auto-id counter.
#[derive(Debug)]
pub struct IdAllocator {
    prefix: String,
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_ID_PREFIX.to_string(),
            next: AtomicU64::new(1),
        }
    }

    /// Allocator with a custom prefix. The prefix must not be empty.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(Error::InvalidConfig("id prefix must not be empty".into()));
        }
        Ok(Self { prefix, next: AtomicU64::new(1) })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Take the next id. Never returns the same number twice.
    pub fn allocate(&self) -> ConceptId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        self.format(n)
    }

    /// The number the next `allocate()` will use.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Make sure the counter is past `n`. Never moves it backwards.
    pub fn advance_past(&self, n: u64) {
        self.next.fetch_max(n.saturating_add(1), Ordering::Relaxed);
    }

    /// Restart the sequence at 1.
    pub fn reset(&self) {
        self.next.store(1, Ordering::Relaxed);
    }

    /// Counter number encoded in `id`, if `id` has this allocator's shape.
    pub fn sequence_of(&self, id: &str) -> Option<u64> {
        let digits = id.strip_prefix(self.prefix.as_str())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    fn format(&self, n: u64) -> ConceptId {
        ConceptId(format!("{}{}", self.prefix, n))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
