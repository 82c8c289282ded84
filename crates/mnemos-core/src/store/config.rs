//! Store tunables

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, Result};

/// Tunables for an [`AssociativeMemory`](super::AssociativeMemory)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Per-day exponential decay constant applied during consolidation
    pub decay_rate: f64,
    /// Strength added on recall, on re-creation, and to a re-created association
    pub reinforcement_boost: f64,
    /// Associations weaker than this are pruned during consolidation
    pub association_threshold: f64,
    /// Entries weaker than this are forgotten during consolidation
    pub forgetting_threshold: f64,
    /// Consolidation boost for associations whose endpoints were both recalled
    pub association_reinforcement: f64,
    /// Consolidation penalty for associations with an unrecalled endpoint
    pub association_decay: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            reinforcement_boost: 0.2,
            association_threshold: 0.3,
            forgetting_threshold: 0.1,
            association_reinforcement: 0.05,
            association_decay: 0.1,
        }
    }
}

impl MemoryConfig {
    /// Check every tunable against its range
    pub fn validate(&self) -> Result<()> {
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(MemoryError::InvalidConfig {
                field: "decay_rate",
                value: self.decay_rate,
                reason: "must be finite and non-negative",
            });
        }

        let unit_fields = [
            ("reinforcement_boost", self.reinforcement_boost),
            ("association_threshold", self.association_threshold),
            ("forgetting_threshold", self.forgetting_threshold),
            ("association_reinforcement", self.association_reinforcement),
            ("association_decay", self.association_decay),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(MemoryError::InvalidConfig {
                    field,
                    value,
                    reason: "must be within [0, 1]",
                });
            }
        }

        Ok(())
    }
}
