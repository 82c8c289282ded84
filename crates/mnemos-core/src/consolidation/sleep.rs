//! Sleep Consolidation
//!
//! Bio-inspired memory consolidation that mimics what happens during sleep:
//!
//! 1. **Decay Phase**: Apply the forgetting curve to every entry and forget
//!    the ones that fall below the forgetting threshold
//! 2. **Association Phase**: Strengthen links whose endpoints have both been
//!    recalled, weaken the rest, and prune links below the association threshold
//!
//! This should be run periodically (e.g., once per day). The store applies the
//! decisions made here; see `AssociativeMemory::consolidate_memories`.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::memory::{Association, MemoryEntry};
use crate::store::MemoryConfig;

// ============================================================================
// CONSOLIDATION REPORT
// ============================================================================

/// Result of a consolidation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationReport {
    /// Entries that had decay applied
    pub entries_decayed: usize,
    /// Entries forgotten for falling below the forgetting threshold
    pub entries_forgotten: usize,
    /// Associations removed because an endpoint was forgotten
    pub associations_cascaded: usize,
    /// Associations strengthened (both endpoints recalled)
    pub associations_strengthened: usize,
    /// Associations weakened (an endpoint never recalled)
    pub associations_weakened: usize,
    /// Associations pruned for falling below the association threshold
    pub associations_pruned: usize,
    /// Processing duration in milliseconds
    pub duration_ms: u64,
}

// ============================================================================
// SLEEP CONSOLIDATION
// ============================================================================

/// What consolidation does to a surviving association
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssociationAdjustment {
    Strengthen(f64),
    Weaken(f64),
}

/// Consolidation decisions, parameterized by the store's tunables
#[derive(Debug, Clone, Copy)]
pub struct SleepConsolidation {
    config: MemoryConfig,
}

impl Default for SleepConsolidation {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl SleepConsolidation {
    /// Create a consolidation engine using the given tunables
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Whether a decayed entry should be forgotten
    pub fn should_forget<C>(&self, entry: &MemoryEntry<C>) -> bool {
        entry.strength < self.config.forgetting_threshold
    }

    /// How a surviving association changes, given whether its endpoints were recalled
    pub fn association_adjustment(
        &self,
        source_accessed: bool,
        target_accessed: bool,
    ) -> AssociationAdjustment {
        if source_accessed && target_accessed {
            AssociationAdjustment::Strengthen(self.config.association_reinforcement)
        } else {
            AssociationAdjustment::Weaken(self.config.association_decay)
        }
    }

    /// Whether an adjusted association should be pruned
    pub fn should_prune(&self, association: &Association) -> bool {
        association.strength < self.config.association_threshold
    }

    /// Create a consolidation report tracker
    pub fn start_run(&self) -> ConsolidationRun {
        ConsolidationRun {
            start_time: Instant::now(),
            report: ConsolidationReport::default(),
        }
    }
}

/// Tracks a consolidation run in progress
pub struct ConsolidationRun {
    start_time: Instant,
    report: ConsolidationReport,
}

impl ConsolidationRun {
    /// Record that decay was applied to an entry
    pub fn record_decay(&mut self) {
        self.report.entries_decayed += 1;
    }

    /// Record that an entry was forgotten along with `cascaded` associations
    pub fn record_forget(&mut self, cascaded: usize) {
        self.report.entries_forgotten += 1;
        self.report.associations_cascaded += cascaded;
    }

    /// Record an association adjustment
    pub fn record_adjustment(&mut self, adjustment: AssociationAdjustment) {
        match adjustment {
            AssociationAdjustment::Strengthen(_) => self.report.associations_strengthened += 1,
            AssociationAdjustment::Weaken(_) => self.report.associations_weakened += 1,
        }
    }

    /// Record that an association was pruned
    pub fn record_prune(&mut self) {
        self.report.associations_pruned += 1;
    }

    /// Finish the run and create a report
    pub fn finish(mut self) -> ConsolidationReport {
        self.report.duration_ms = self.start_time.elapsed().as_millis() as u64;
        self.report
    }
}

// ============================================================================
// TESTS
// ============================================================================
