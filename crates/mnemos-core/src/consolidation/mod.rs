//! Memory Consolidation Module
//!
//! Implements sleep-inspired memory consolidation:
//! - Decay every memory by the time since it was last recalled
//! - Forget memories that have grown too weak
//! - Reinforce or weaken associations depending on use
//! - Prune associations that have grown too weak

mod sleep;

pub use sleep::{AssociationAdjustment, ConsolidationReport, ConsolidationRun, SleepConsolidation};
