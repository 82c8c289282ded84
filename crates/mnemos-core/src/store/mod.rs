//! Associative Memory Store
//!
//! The engine that owns every entry and association:
//! - Exact-match content deduplication (re-creating content reinforces it)
//! - Directed association storage, queried as undirected
//! - Tag and context indices kept in lockstep with the entry arena
//! - Spreading activation and sleep consolidation over the graph
//!
//! The store is synchronous and holds no locks. Mutation goes through
//! `&mut self`; callers that share a store across threads wrap it in their
//! own lock. Queries hand out borrowed views, never mutable handles, so the
//! indices cannot drift from the entries they describe.

mod config;
mod index;
mod snapshot;

pub use config::MemoryConfig;
pub use snapshot::{MemorySnapshot, SnapshotAssociation, SnapshotEntry};

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::consolidation::{AssociationAdjustment, ConsolidationReport, SleepConsolidation};
use crate::error::Result;
use crate::memory::{
    Association, Context, ContextValue, MemoryEntry, MemoryKey, MemoryStats,
    DEFAULT_ASSOCIATION_KIND,
};
use crate::neuroscience::{spread, ActivatedMemory};

use index::{ContextIndex, TagIndex};

/// Content-addressed, weighted graph of memories
#[derive(Debug, Clone)]
pub struct AssociativeMemory<C = String> {
    config: MemoryConfig,
    entries: BTreeMap<MemoryKey, MemoryEntry<C>>,
    content_index: HashMap<C, MemoryKey>,
    /// Associations by insertion sequence
    associations: BTreeMap<u64, Association>,
    /// Ordered (source, target) pair → association sequence
    pair_index: HashMap<(MemoryKey, MemoryKey), u64>,
    /// Entry → every association touching it, either direction
    adjacency: HashMap<MemoryKey, BTreeSet<u64>>,
    tag_index: TagIndex,
    context_index: ContextIndex,
    next_memory_id: u64,
    next_association_id: u64,
}

impl<C> Default for AssociativeMemory<C>
where
    C: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> AssociativeMemory<C>
where
    C: Eq + Hash + Clone,
{
    /// Create an empty store with default tunables
    pub fn new() -> Self {
        Self::build(MemoryConfig::default())
    }

    /// Create an empty store with custom tunables
    pub fn with_config(config: MemoryConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected memory config: {}", e);
            return Err(e);
        }
        Ok(Self::build(config))
    }

    fn build(config: MemoryConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
            content_index: HashMap::new(),
            associations: BTreeMap::new(),
            pair_index: HashMap::new(),
            adjacency: HashMap::new(),
            tag_index: TagIndex::default(),
            context_index: ContextIndex::default(),
            next_memory_id: 0,
            next_association_id: 0,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    // ========================================================================
    // CREATION
    // ========================================================================

    /// Create a memory, or reinforce it if the content already exists
    ///
    /// Tags and context are only recorded when the content is new; an existing
    /// entry is reinforced by `reinforcement_boost` and otherwise unchanged.
    pub fn create_memory<T, S>(
        &mut self,
        content: impl Into<C>,
        tags: T,
        context: Context,
    ) -> &MemoryEntry<C>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = self.upsert(content.into(), tags, context);
        &self.entries[&key]
    }

    /// Create a memory with no tags or context
    pub fn remember(&mut self, content: impl Into<C>) -> &MemoryEntry<C> {
        self.create_memory(content, std::iter::empty::<String>(), Context::new())
    }

    /// Create an association, or strengthen it if the ordered pair exists
    ///
    /// Both endpoints go through [`create_memory`](Self::create_memory) first,
    /// so missing endpoints are created (untagged) and existing ones are
    /// reinforced. `kind`, `strength` and `context` only apply to a new edge.
    pub fn create_association(
        &mut self,
        source: impl Into<C>,
        target: impl Into<C>,
        kind: &str,
        strength: f64,
        context: Context,
    ) -> &Association {
        let source = self.upsert(source.into(), std::iter::empty::<String>(), Context::new());
        let target = self.upsert(target.into(), std::iter::empty::<String>(), Context::new());

        let existing = self.pair_index.get(&(source, target)).copied();
        let id = match existing {
            Some(id) => {
                let boost = self.config.reinforcement_boost;
                if let Some(assoc) = self.associations.get_mut(&id) {
                    assoc.strengthen(boost);
                    tracing::trace!(id, strength = assoc.strength, "Reinforced association");
                }
                id
            }
            None => {
                let id = self.next_association_id;
                self.next_association_id += 1;
                let assoc = Association::new(id, source, target, kind, strength, context);
                tracing::debug!(
                    id,
                    source = %source,
                    target = %target,
                    kind = %assoc.kind,
                    strength = assoc.strength,
                    "Created association"
                );
                self.insert_association(assoc);
                id
            }
        };

        &self.associations[&id]
    }

    /// Create a `generic` association with the given strength and no context
    pub fn associate(
        &mut self,
        source: impl Into<C>,
        target: impl Into<C>,
        strength: f64,
    ) -> &Association {
        self.create_association(source, target, DEFAULT_ASSOCIATION_KIND, strength, Context::new())
    }

    fn upsert<T, S>(&mut self, content: C, tags: T, context: Context) -> MemoryKey
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(key) = self.content_index.get(&content).copied() {
            self.reinforce_key(key, Utc::now());
            return key;
        }

        let key = MemoryKey::new(self.next_memory_id, Utc::now());
        self.next_memory_id += 1;

        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        let entry = MemoryEntry::new(key, content, tags, context);
        tracing::debug!(
            key = %key,
            tags = entry.tags.len(),
            context = entry.context.len(),
            "Created memory"
        );
        self.insert_entry(entry);
        key
    }

    fn reinforce_key(&mut self, key: MemoryKey, now: DateTime<Utc>) {
        let boost = self.config.reinforcement_boost;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.reinforce_at(boost, now);
            tracing::trace!(
                key = %key,
                strength = entry.strength,
                access_count = entry.access_count,
                "Reinforced memory"
            );
        }
    }

    /// Index and store an entry; the single path every entry enters through
    fn insert_entry(&mut self, entry: MemoryEntry<C>) {
        let key = entry.id;
        self.content_index.insert(entry.content.clone(), key);
        self.tag_index.insert(key, &entry.tags);
        self.context_index.insert(key, &entry.context);
        self.entries.insert(key, entry);
    }

    /// Store an association and link both endpoints to it
    fn insert_association(&mut self, assoc: Association) {
        let id = assoc.id;
        self.pair_index.insert((assoc.source_id, assoc.target_id), id);
        self.adjacency.entry(assoc.source_id).or_default().insert(id);
        self.adjacency.entry(assoc.target_id).or_default().insert(id);
        self.associations.insert(id, assoc);
    }

    // ========================================================================
    // RECALL & LOOKUP
    // ========================================================================

    /// Recall a memory by exact content, reinforcing it when `strengthen` is set
    pub fn recall<Q>(&mut self, content: &Q, strengthen: bool) -> Option<&MemoryEntry<C>>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = self.key_of(content)?;
        if strengthen {
            self.reinforce_key(key, Utc::now());
        }
        self.entries.get(&key)
    }

    /// Look up a memory without reinforcing it
    pub fn get<Q>(&self, content: &Q) -> Option<&MemoryEntry<C>>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.key_of(content).and_then(|key| self.entries.get(&key))
    }

    /// Key of the memory holding `content`
    pub fn key_of<Q>(&self, content: &Q) -> Option<MemoryKey>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.content_index.get(content).copied()
    }

    /// Entry stored under `key`
    pub fn entry(&self, key: MemoryKey) -> Option<&MemoryEntry<C>> {
        self.entries.get(&key)
    }

    pub fn contains<Q>(&self, content: &Q) -> bool
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.content_index.contains_key(content)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live associations
    pub fn association_count(&self) -> usize {
        self.associations.len()
    }

    /// All entries, in creation order
    pub fn entries(&self) -> impl Iterator<Item = &MemoryEntry<C>> {
        self.entries.values()
    }

    /// All associations, in creation order
    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.associations.values()
    }

    /// The association stored under the ordered pair (source, target)
    pub fn association<Q>(&self, source: &Q, target: &Q) -> Option<&Association>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let pair = (self.key_of(source)?, self.key_of(target)?);
        self.pair_index
            .get(&pair)
            .and_then(|id| self.associations.get(id))
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Associations touching `content` in either direction, strongest first
    ///
    /// Equal strengths keep association creation order.
    pub fn find_associations<Q>(&self, content: &Q, min_strength: f64) -> Vec<&Association>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(key) = self.key_of(content) else {
            return Vec::new();
        };

        let mut found: Vec<&Association> = self
            .touching(key)
            .filter(|assoc| assoc.strength >= min_strength)
            .collect();
        found.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        found
    }

    /// Memories carrying any (or, with `require_all`, every) tag, strongest first
    pub fn find_by_tags<S: AsRef<str>>(&self, tags: &[S], require_all: bool) -> Vec<&MemoryEntry<C>> {
        if tags.is_empty() {
            return Vec::new();
        }

        let keys = if require_all {
            self.tag_index.intersection(tags)
        } else {
            self.tag_index.union(tags)
        };
        self.ranked(keys)
    }

    /// Memories whose context maps `key` to `value`, strongest first
    pub fn find_by_context(&self, key: &str, value: impl Into<ContextValue>) -> Vec<&MemoryEntry<C>> {
        match self.context_index.lookup(key, &value.into()) {
            Some(bucket) => self.ranked(bucket.iter().copied()),
            None => Vec::new(),
        }
    }

    /// Spread activation outward from `start` for `depth` rounds
    ///
    /// See [`crate::neuroscience::spreading_activation`] for the saturation
    /// and ordering rules. Unknown content yields an empty result.
    pub fn spread_activation<Q>(&self, start: &Q, depth: usize) -> Vec<ActivatedMemory<'_, C>>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(start) = self.key_of(start) else {
            return Vec::new();
        };

        spread(start, depth, |key| self.neighbours(key))
            .into_iter()
            .filter_map(|trace| {
                self.entries.get(&trace.key).map(|entry| ActivatedMemory {
                    entry,
                    activation: trace.activation,
                    depth: trace.depth,
                })
            })
            .collect()
    }

    /// Summary statistics over the whole store
    pub fn stats(&self) -> MemoryStats {
        let total_memories = self.entries.len();
        let total_associations = self.associations.len();

        let average_strength = if total_memories > 0 {
            self.entries.values().map(|e| e.strength).sum::<f64>() / total_memories as f64
        } else {
            0.0
        };
        let average_association_strength = if total_associations > 0 {
            self.associations.values().map(|a| a.strength).sum::<f64>()
                / total_associations as f64
        } else {
            0.0
        };

        MemoryStats {
            total_memories,
            total_associations,
            average_strength,
            average_association_strength,
            accessed_memories: self.entries.values().filter(|e| e.was_accessed()).count(),
            distinct_tags: self.tag_index.len(),
            oldest_memory: self.entries.values().map(|e| e.created_at).min(),
            newest_memory: self.entries.values().map(|e| e.created_at).max(),
        }
    }

    fn touching(&self, key: MemoryKey) -> impl Iterator<Item = &Association> + '_ {
        self.adjacency
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.associations.get(id))
    }

    fn neighbours(&self, key: MemoryKey) -> impl Iterator<Item = (MemoryKey, f64)> + '_ {
        self.touching(key)
            .filter_map(move |assoc| assoc.other_end(key).map(|other| (other, assoc.strength)))
    }

    fn ranked(&self, keys: impl IntoIterator<Item = MemoryKey>) -> Vec<&MemoryEntry<C>> {
        let mut found: Vec<&MemoryEntry<C>> =
            keys.into_iter().filter_map(|key| self.entries.get(&key)).collect();
        found.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        found
    }

    // ========================================================================
    // CONSOLIDATION & FORGETTING
    // ========================================================================

    /// Run one sleep cycle as of now
    ///
    /// 1. Decay every entry by `decay_rate`; forget entries below
    ///    `forgetting_threshold` together with every association touching them.
    /// 2. Strengthen associations whose endpoints have both been recalled,
    ///    weaken the rest, and prune any below `association_threshold`.
    pub fn consolidate_memories(&mut self) -> ConsolidationReport {
        self.consolidate_at(Utc::now())
    }

    /// Run one sleep cycle as of `now`
    pub fn consolidate_at(&mut self, now: DateTime<Utc>) -> ConsolidationReport {
        let sleep = SleepConsolidation::new(self.config);
        let mut run = sleep.start_run();
        let rate = self.config.decay_rate;

        let mut fading = Vec::new();
        for entry in self.entries.values_mut() {
            entry.decay(now, rate);
            run.record_decay();
            if sleep.should_forget(entry) {
                fading.push(entry.id);
            }
        }
        for key in fading {
            if let Some(cascaded) = self.forget_key(key) {
                run.record_forget(cascaded);
            }
        }

        let ids: Vec<u64> = self.associations.keys().copied().collect();
        for id in ids {
            let Some((source, target)) = self
                .associations
                .get(&id)
                .map(|assoc| (assoc.source_id, assoc.target_id))
            else {
                continue;
            };
            let accessed = |key: MemoryKey| self.entries.get(&key).is_some_and(|e| e.was_accessed());
            let adjustment = sleep.association_adjustment(accessed(source), accessed(target));

            let Some(assoc) = self.associations.get_mut(&id) else {
                continue;
            };
            match adjustment {
                AssociationAdjustment::Strengthen(amount) => assoc.strengthen(amount),
                AssociationAdjustment::Weaken(amount) => assoc.weaken(amount),
            }
            run.record_adjustment(adjustment);

            if sleep.should_prune(assoc) {
                tracing::debug!(id, strength = assoc.strength, "Pruned association");
                self.remove_association(id);
                run.record_prune();
            }
        }

        let report = run.finish();
        tracing::info!(
            decayed = report.entries_decayed,
            forgotten = report.entries_forgotten,
            cascaded = report.associations_cascaded,
            strengthened = report.associations_strengthened,
            weakened = report.associations_weakened,
            pruned = report.associations_pruned,
            duration_ms = report.duration_ms,
            "Consolidation complete"
        );
        report
    }

    /// Forget a memory and every association touching it
    ///
    /// Returns false when the content is unknown.
    pub fn forget<Q>(&mut self, content: &Q) -> bool
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.key_of(content) {
            Some(key) => self.forget_key(key).is_some(),
            None => false,
        }
    }

    /// Remove an entry from every structure; returns the number of associations dropped
    fn forget_key(&mut self, key: MemoryKey) -> Option<usize> {
        let entry = self.entries.remove(&key)?;
        self.content_index.remove(&entry.content);
        self.tag_index.remove(key, &entry.tags);
        self.context_index.remove(key, &entry.context);

        let linked = self.adjacency.remove(&key).unwrap_or_default();
        let cascaded = linked
            .into_iter()
            .filter(|&id| self.remove_association(id).is_some())
            .count();

        tracing::debug!(
            key = %key,
            strength = entry.strength,
            cascaded,
            "Forgot memory"
        );
        Some(cascaded)
    }

    fn remove_association(&mut self, id: u64) -> Option<Association> {
        let assoc = self.associations.remove(&id)?;
        self.pair_index.remove(&(assoc.source_id, assoc.target_id));
        for endpoint in [assoc.source_id, assoc.target_id] {
            if let Some(linked) = self.adjacency.get_mut(&endpoint) {
                linked.remove(&id);
                if linked.is_empty() {
                    self.adjacency.remove(&endpoint);
                }
            }
        }
        Some(assoc)
    }
}

// ============================================================================
// TESTS
// ============================================================================
