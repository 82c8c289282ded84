//! # Mnemos Core
//!
//! Associative memory engine. A content-addressed, weighted graph in which
//! memories and the associations between them strengthen with use and fade
//! with time:
//!
//! - **Exact-match dedup**: creating the same content twice reinforces the
//!   existing memory instead of duplicating it
//! - **Exponential Decay**: strength falls as `exp(-rate · days)` since last recall
//! - **Reinforcement**: every recall adds a bounded boost ("use it or lose it")
//! - **Associations**: directed, typed, weighted links, queried as undirected
//! - **Spreading Activation**: bounded-depth priming across the graph
//!   (Collins & Loftus, 1975)
//! - **Sleep Consolidation**: periodic decay, forgetting and association pruning
//!
//! The engine is synchronous and in-memory. It does no I/O and takes no locks;
//! wrap a store in your own lock or task to share it.
//!
//! ## Quick Start
//!
//! ```rust
//! use mnemos_core::{AssociativeMemory, Context};
//!
//! let mut memory: AssociativeMemory = AssociativeMemory::new();
//!
//! memory.create_memory("Python", ["programming"], Context::new());
//! memory.create_memory("Django", ["framework"], Context::new());
//! memory.associate("Python", "Django", 0.8);
//!
//! let links = memory.find_associations("Python", 0.3);
//! assert_eq!(links.len(), 1);
//!
//! let primed = memory.spread_activation("Python", 2);
//! assert_eq!(primed[0].entry.content, "Python");
//! assert_eq!(primed[1].activation, 0.8);
//!
//! // Periodic sleep cycle
//! let report = memory.consolidate_memories();
//! assert_eq!(report.entries_forgotten, 0);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod consolidation;
pub mod error;
pub mod memory;
pub mod store;

/// Neuroscience-inspired retrieval
///
/// - Spreading activation networks
pub mod neuroscience;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Memory types
pub use memory::{
    Association, Context, ContextValue, MemoryEntry, MemoryKey, MemoryStats,
    DEFAULT_ASSOCIATION_KIND, DEFAULT_ASSOCIATION_STRENGTH, SECONDS_PER_DAY,
};

// The engine
pub use store::{
    AssociativeMemory, MemoryConfig, MemorySnapshot, SnapshotAssociation, SnapshotEntry,
};

// Consolidation (sleep-inspired memory processing)
pub use consolidation::{AssociationAdjustment, ConsolidationReport, SleepConsolidation};

// Spreading activation
pub use neuroscience::{ActivatedMemory, ActivationTrace, INITIAL_ACTIVATION};

// Errors
pub use error::{MemoryError, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        ActivatedMemory, Association, AssociativeMemory, ConsolidationReport, Context,
        ContextValue, MemoryConfig, MemoryEntry, MemoryError, MemoryKey, MemoryStats, Result,
    };
}
