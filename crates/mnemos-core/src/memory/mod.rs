//! Memory module - Core types and data structures
//!
//! Implements the associative memory model with:
//! - Memory entries that decay exponentially and strengthen on recall
//! - Directed, typed, weighted associations between entries
//! - Context values usable as index keys

mod association;
mod entry;

pub use association::{Association, DEFAULT_ASSOCIATION_KIND, DEFAULT_ASSOCIATION_STRENGTH};
pub use entry::{MemoryEntry, SECONDS_PER_DAY};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

// ============================================================================
// MEMORY KEY
// ============================================================================

/// Stable identity of a memory entry
///
/// Keys are handed out sequentially by the store, so ordering keys orders
/// entries by creation. The creation timestamp travels with the key to keep
/// the (content, first creation) identity visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryKey {
    /// Sequential identifier, unique within one store
    pub id: u64,
    /// When the entry was first created
    pub created_at: DateTime<Utc>,
}

impl MemoryKey {
    pub(crate) fn new(id: u64, created_at: DateTime<Utc>) -> Self {
        Self { id, created_at }
    }
}

impl std::fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mem-{:08x}@{}", self.id, self.created_at.timestamp())
    }
}

// ============================================================================
// CONTEXT VALUES
// ============================================================================

/// A classification value attached to a memory or association
///
/// Only hashable scalars are allowed, since every value doubles as a key in
/// the context index. Serialized as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for ContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextValue::Flag(b) => write!(f, "{}", b),
            ContextValue::Integer(i) => write!(f, "{}", i),
            ContextValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Flag(value)
    }
}

impl TryFrom<serde_json::Value> for ContextValue {
    type Error = MemoryError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Bool(b) => Ok(ContextValue::Flag(b)),
            serde_json::Value::String(s) => Ok(ContextValue::Text(s)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(ContextValue::Integer)
                .ok_or_else(|| MemoryError::UnsupportedContextValue(n.to_string())),
            other => Err(MemoryError::UnsupportedContextValue(other.to_string())),
        }
    }
}

/// Context key/values of an entry or association
pub type Context = BTreeMap<String, ContextValue>;

// ============================================================================
// MEMORY STATISTICS
// ============================================================================

/// Statistics about the memory store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    /// Number of live entries
    pub total_memories: usize,
    /// Number of live associations
    pub total_associations: usize,
    /// Average entry strength (0.0 when empty)
    pub average_strength: f64,
    /// Average association strength (0.0 when there are none)
    pub average_association_strength: f64,
    /// Entries that have been reinforced at least once
    pub accessed_memories: usize,
    /// Distinct tags currently indexed
    pub distinct_tags: usize,
    /// Creation time of the oldest entry
    pub oldest_memory: Option<DateTime<Utc>>,
    /// Creation time of the newest entry
    pub newest_memory: Option<DateTime<Utc>>,
}

// ============================================================================
// TESTS
// ============================================================================
