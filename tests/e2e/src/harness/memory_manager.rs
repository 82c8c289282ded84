//! Test Memory Manager
//!
//! Provides isolated memory stores for testing:
//! - A simulated clock that consolidation runs against
//! - In-process snapshots and restoration
//! - JSON export/import through a temporary directory

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use mnemos_core::{AssociativeMemory, ConsolidationReport, MemoryConfig, MemorySnapshot};
use tempfile::TempDir;

/// Manager for test stores
///
/// Each manager owns its own store, so tests never interfere. Time only
/// moves when the test says so: `advance_days` shifts the clock and
/// `sleep` consolidates as of the shifted clock.
///
/// # Example
///
/// ```rust,ignore
/// let mut mgr = TestMemoryManager::new();
/// mgr.memory.remember("Python");
///
/// mgr.advance_days(30);
/// let report = mgr.sleep();
/// assert_eq!(report.entries_forgotten, 1);
/// ```
pub struct TestMemoryManager {
    /// The store under test
    pub memory: AssociativeMemory,
    /// Simulated "now"
    clock: DateTime<Utc>,
    /// Snapshot data for restore operations
    snapshot: Option<MemorySnapshot<String>>,
    /// Export directory, created on first export
    export_dir: Option<TempDir>,
}

impl Default for TestMemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMemoryManager {
    /// Create a manager with the default configuration
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::default())
    }

    /// Create a manager with a custom configuration
    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            memory: AssociativeMemory::with_config(config).expect("Invalid test configuration"),
            clock: Utc::now(),
            snapshot: None,
            export_dir: None,
        }
    }

    // ========================================================================
    // CLOCK
    // ========================================================================

    /// The simulated current time
    pub fn now(&self) -> DateTime<Utc> {
        self.clock
    }

    /// Move the simulated clock forward
    pub fn advance_days(&mut self, days: i64) {
        self.clock += Duration::days(days);
    }

    /// Move the simulated clock forward by hours
    pub fn advance_hours(&mut self, hours: i64) {
        self.clock += Duration::hours(hours);
    }

    /// Consolidate as of the simulated clock
    pub fn sleep(&mut self) -> ConsolidationReport {
        self.memory.consolidate_at(self.clock)
    }

    /// Advance the clock and consolidate, `nights` times
    pub fn sleep_for(&mut self, nights: usize, days_per_night: i64) -> Vec<ConsolidationReport> {
        (0..nights)
            .map(|_| {
                self.advance_days(days_per_night);
                self.sleep()
            })
            .collect()
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Take a snapshot of current store state
    pub fn take_snapshot(&mut self) {
        self.snapshot = Some(self.memory.snapshot());
    }

    /// Replace the store with one rebuilt from the last snapshot
    ///
    /// Keys are reissued, so keys held from before the restore are stale.
    pub fn restore_snapshot(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.clone() else {
            return false;
        };
        match AssociativeMemory::restore(*self.memory.config(), snapshot) {
            Ok(memory) => {
                self.memory = memory;
                true
            }
            Err(_) => false,
        }
    }

    /// Overwrite one memory's strength by round-tripping through a snapshot
    ///
    /// Returns false when the content is unknown.
    pub fn set_strength(&mut self, content: &str, strength: f64) -> bool {
        let mut snapshot = self.memory.snapshot();
        let Some(saved) = snapshot.entries.iter_mut().find(|e| e.content == content) else {
            return false;
        };
        saved.strength = strength;
        self.memory = AssociativeMemory::restore(*self.memory.config(), snapshot)
            .expect("Snapshot of a live store restores cleanly");
        true
    }

    /// Check if a snapshot exists
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    // ========================================================================
    // EXPORT / IMPORT
    // ========================================================================

    /// Write a snapshot of the store as JSON and return its path
    ///
    /// The file lives in a temporary directory owned by the manager.
    pub fn export_json(&mut self, name: &str) -> PathBuf {
        let dir = self
            .export_dir
            .get_or_insert_with(|| TempDir::new().expect("Failed to create temp directory"));
        let path = dir.path().join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(&self.memory.snapshot())
            .expect("Failed to serialize snapshot");
        std::fs::write(&path, json).expect("Failed to write snapshot");
        path
    }

    /// Build a fresh store from an exported JSON file
    pub fn import_json(&self, path: &Path) -> mnemos_core::Result<AssociativeMemory> {
        let raw = std::fs::read_to_string(path).expect("Failed to read snapshot");
        let snapshot: MemorySnapshot<String> =
            serde_json::from_str(&raw).expect("Failed to parse snapshot");
        AssociativeMemory::restore(*self.memory.config(), snapshot)
    }

    /// Drop every memory, keeping the configuration
    pub fn clear(&mut self) {
        self.memory = AssociativeMemory::with_config(*self.memory.config())
            .expect("Config was already validated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut mgr = TestMemoryManager::new();
        let start = mgr.now();
        mgr.advance_days(2);
        mgr.advance_hours(12);
        assert_eq!(mgr.now() - start, Duration::hours(60));
    }

    #[test]
    fn test_snapshot_and_restore() {
        let mut mgr = TestMemoryManager::new();
        mgr.memory.associate("a", "b", 0.7);
        mgr.take_snapshot();
        assert!(mgr.has_snapshot());

        mgr.clear();
        assert!(mgr.memory.is_empty());

        assert!(mgr.restore_snapshot());
        assert_eq!(mgr.memory.len(), 2);
        assert_eq!(mgr.memory.association_count(), 1);
    }

    #[test]
    fn test_restore_without_snapshot() {
        let mut mgr = TestMemoryManager::new();
        assert!(!mgr.restore_snapshot());
    }

    #[test]
    fn test_export_import() {
        let mut mgr = TestMemoryManager::new();
        mgr.memory.remember("exported");
        let path = mgr.export_json("one");

        let imported = mgr.import_json(&path).unwrap();
        assert!(imported.contains("exported"));
    }
}
