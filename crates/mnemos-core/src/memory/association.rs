//! Associations - directed, typed, weighted links between entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Context, MemoryKey};

/// Strength given to a new association when the caller has no opinion
pub const DEFAULT_ASSOCIATION_STRENGTH: f64 = 0.5;

/// Relation label given to a new association when the caller has no opinion
pub const DEFAULT_ASSOCIATION_KIND: &str = "generic";

/// A directed edge between two memory entries
///
/// Stored under its ordered (source, target) pair, but every query treats
/// it as undirected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    /// Insertion sequence, unique within one store
    pub id: u64,
    /// Source entry
    pub source_id: MemoryKey,
    /// Target entry
    pub target_id: MemoryKey,
    /// Edge weight (0.0 - 1.0)
    pub strength: f64,
    /// Free-form relation label
    pub kind: String,
    /// Classification key/values
    pub context: Context,
    /// When the association was created
    pub created_at: DateTime<Utc>,
}

impl Association {
    pub(crate) fn new(
        id: u64,
        source_id: MemoryKey,
        target_id: MemoryKey,
        kind: impl Into<String>,
        strength: f64,
        context: Context,
    ) -> Self {
        Self {
            id,
            source_id,
            target_id,
            strength: strength.clamp(0.0, 1.0),
            kind: kind.into(),
            context,
            created_at: Utc::now(),
        }
    }

    /// Strengthen the association, capped at 1.0
    pub fn strengthen(&mut self, amount: f64) {
        self.strength = (self.strength + amount).min(1.0);
    }

    /// Weaken the association, floored at 0.0
    pub fn weaken(&mut self, amount: f64) {
        self.strength = (self.strength - amount).max(0.0);
    }

    /// Whether `key` is either endpoint
    pub fn touches(&self, key: MemoryKey) -> bool {
        self.source_id == key || self.target_id == key
    }

    /// The endpoint opposite `key`, if `key` is an endpoint
    ///
    /// A self-loop yields `key` itself.
    pub fn other_end(&self, key: MemoryKey) -> Option<MemoryKey> {
        if self.source_id == key {
            Some(self.target_id)
        } else if self.target_id == key {
            Some(self.source_id)
        } else {
            None
        }
    }
}
