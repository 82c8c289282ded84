//! Memory Entry - The fundamental unit of memory
//!
//! Each entry holds:
//! - Content and its identity key
//! - Temporal bookkeeping (creation, last access, access count)
//! - A strength in [0, 1] that decays exponentially with elapsed days
//! - Tags and context used by the secondary indices

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Context, MemoryKey};

/// Seconds in one day; decay rates are expressed per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// A single remembered content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry<C> {
    /// Identity key, fixed at creation
    pub id: MemoryKey,
    /// The remembered content
    pub content: C,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry was last reinforced
    pub last_access: DateTime<Utc>,
    /// Number of reinforcements
    pub access_count: u32,
    /// Current strength (1.0 = fresh, 0.0 = forgotten)
    pub strength: f64,
    /// Tags for categorization
    pub tags: BTreeSet<String>,
    /// Classification key/values
    pub context: Context,
}

impl<C> MemoryEntry<C> {
    /// Create a fresh entry at full strength
    pub(crate) fn new(id: MemoryKey, content: C, tags: BTreeSet<String>, context: Context) -> Self {
        Self {
            id,
            content,
            created_at: id.created_at,
            last_access: id.created_at,
            access_count: 0,
            strength: 1.0,
            tags,
            context,
        }
    }

    /// Apply exponential decay for the time elapsed since the last access
    ///
    /// `rate` is per day. A `now` earlier than `last_access` counts as no
    /// elapsed time. Access bookkeeping is left untouched.
    pub fn decay(&mut self, now: DateTime<Utc>, rate: f64) {
        let elapsed = seconds_since(self.last_access, now);
        self.strength *= (-rate * elapsed / SECONDS_PER_DAY).exp();
    }

    /// Reinforce the entry through recall
    pub fn reinforce(&mut self, boost: f64) {
        self.reinforce_at(boost, Utc::now());
    }

    /// Reinforce the entry as of `now`
    pub fn reinforce_at(&mut self, boost: f64, now: DateTime<Utc>) {
        self.strength = (self.strength + boost).min(1.0);
        self.access_count = self.access_count.saturating_add(1);
        self.last_access = now;
    }

    /// Whether the entry has ever been reinforced
    pub fn was_accessed(&self) -> bool {
        self.access_count > 0
    }

    /// Days elapsed since the last access, as of `now`
    pub fn idle_days(&self, now: DateTime<Utc>) -> f64 {
        seconds_since(self.last_access, now) / SECONDS_PER_DAY
    }
}

/// Seconds from `since` to `now`, never negative
///
/// Microsecond resolution, dropping to whole seconds for spans too long to
/// count in microseconds.
fn seconds_since(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now - since;
    let seconds = match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => elapsed.num_seconds() as f64,
    };
    seconds.max(0.0)
}

// ============================================================================
// TESTS
// ============================================================================
