//! Snapshots
//!
//! A snapshot is a plain, serializable copy of every entry and association,
//! with associations naming their endpoints by content instead of by key.
//! Where the snapshot is kept is up to the caller. Restoring goes through the
//! same indexing path as `create_memory`, so a restored store satisfies every
//! index invariant of a freshly built one.

use std::collections::BTreeSet;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AssociativeMemory, MemoryConfig};
use crate::error::{MemoryError, Result};
use crate::memory::{Association, Context, MemoryEntry, MemoryKey};

/// Serializable copy of a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot<C> {
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
    /// Entries in creation order
    pub entries: Vec<SnapshotEntry<C>>,
    /// Associations in creation order
    pub associations: Vec<SnapshotAssociation<C>>,
}

/// One entry of a [`MemorySnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry<C> {
    pub content: C,
    pub created_at: DateTime<Utc>,
    pub last_access: DateTime<Utc>,
    #[serde(default)]
    pub access_count: u32,
    pub strength: f64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub context: Context,
}

/// One association of a [`MemorySnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAssociation<C> {
    pub source: C,
    pub target: C,
    pub strength: f64,
    pub kind: String,
    #[serde(default)]
    pub context: Context,
    pub created_at: DateTime<Utc>,
}

impl<C> AssociativeMemory<C>
where
    C: Eq + Hash + Clone,
{
    /// Copy every entry and association out of the store
    pub fn snapshot(&self) -> MemorySnapshot<C> {
        let entries = self
            .entries
            .values()
            .map(|entry| SnapshotEntry {
                content: entry.content.clone(),
                created_at: entry.created_at,
                last_access: entry.last_access,
                access_count: entry.access_count,
                strength: entry.strength,
                tags: entry.tags.clone(),
                context: entry.context.clone(),
            })
            .collect();

        let associations = self
            .associations
            .values()
            .filter_map(|assoc| {
                let source = self.entries.get(&assoc.source_id)?;
                let target = self.entries.get(&assoc.target_id)?;
                Some(SnapshotAssociation {
                    source: source.content.clone(),
                    target: target.content.clone(),
                    strength: assoc.strength,
                    kind: assoc.kind.clone(),
                    context: assoc.context.clone(),
                    created_at: assoc.created_at,
                })
            })
            .collect();

        MemorySnapshot {
            taken_at: Utc::now(),
            entries,
            associations,
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Strengths, access counts and timestamps are kept as recorded. Keys are
    /// reissued in snapshot order. Fails on duplicate content, duplicate
    /// association pairs, or associations naming unknown content.
    pub fn restore(config: MemoryConfig, snapshot: MemorySnapshot<C>) -> Result<Self> {
        let mut store = Self::with_config(config)?;

        for (index, saved) in snapshot.entries.into_iter().enumerate() {
            if store.content_index.contains_key(&saved.content) {
                tracing::warn!(index, "Snapshot repeats content");
                return Err(MemoryError::DuplicateContent { index });
            }

            let key = MemoryKey::new(store.next_memory_id, saved.created_at);
            store.next_memory_id += 1;

            let mut entry = MemoryEntry::new(key, saved.content, saved.tags, saved.context);
            entry.last_access = saved.last_access;
            entry.access_count = saved.access_count;
            entry.strength = saved.strength.clamp(0.0, 1.0);
            store.insert_entry(entry);
        }

        for (index, saved) in snapshot.associations.into_iter().enumerate() {
            let (Some(source), Some(target)) =
                (store.key_of(&saved.source), store.key_of(&saved.target))
            else {
                tracing::warn!(index, "Snapshot association has a missing endpoint");
                return Err(MemoryError::DanglingAssociation { index });
            };
            if store.pair_index.contains_key(&(source, target)) {
                return Err(MemoryError::DuplicateAssociation { index });
            }

            let id = store.next_association_id;
            store.next_association_id += 1;

            let mut assoc =
                Association::new(id, source, target, saved.kind, saved.strength, saved.context);
            assoc.created_at = saved.created_at;
            store.insert_association(assoc);
        }

        tracing::info!(
            memories = store.len(),
            associations = store.association_count(),
            "Restored memory snapshot"
        );
        Ok(store)
    }
}
