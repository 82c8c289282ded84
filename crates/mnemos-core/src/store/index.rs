//! Secondary indices over entries
//!
//! Buckets are `BTreeSet<MemoryKey>` so that lookups come back in creation
//! order. Emptied buckets are dropped, keeping `distinct_tags` honest.

use std::collections::{BTreeSet, HashMap};

use crate::memory::{Context, ContextValue, MemoryKey};

/// Tag → entries
#[derive(Debug, Default, Clone)]
pub(crate) struct TagIndex {
    buckets: HashMap<String, BTreeSet<MemoryKey>>,
}

impl TagIndex {
    pub fn insert<'a>(&mut self, key: MemoryKey, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            self.buckets.entry(tag.clone()).or_default().insert(key);
        }
    }

    pub fn remove<'a>(&mut self, key: MemoryKey, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            if let Some(bucket) = self.buckets.get_mut(tag) {
                bucket.remove(&key);
                if bucket.is_empty() {
                    self.buckets.remove(tag);
                }
            }
        }
    }

    /// Keys carrying any of `tags`
    pub fn union<S: AsRef<str>>(&self, tags: &[S]) -> BTreeSet<MemoryKey> {
        tags.iter()
            .filter_map(|tag| self.buckets.get(tag.as_ref()))
            .flatten()
            .copied()
            .collect()
    }

    /// Keys carrying every one of `tags`
    pub fn intersection<S: AsRef<str>>(&self, tags: &[S]) -> BTreeSet<MemoryKey> {
        let mut buckets = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.buckets.get(tag.as_ref()) {
                Some(bucket) => buckets.push(bucket),
                None => return BTreeSet::new(),
            }
        }

        // Probe the smallest bucket against the rest
        buckets.sort_by_key(|bucket| bucket.len());
        let Some((smallest, rest)) = buckets.split_first() else {
            return BTreeSet::new();
        };
        smallest
            .iter()
            .filter(|key| rest.iter().all(|bucket| bucket.contains(key)))
            .copied()
            .collect()
    }

    pub fn contains(&self, tag: &str, key: MemoryKey) -> bool {
        self.buckets.get(tag).is_some_and(|bucket| bucket.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

/// Context key → value → entries
#[derive(Debug, Default, Clone)]
pub(crate) struct ContextIndex {
    buckets: HashMap<String, HashMap<ContextValue, BTreeSet<MemoryKey>>>,
}

impl ContextIndex {
    pub fn insert(&mut self, key: MemoryKey, context: &Context) {
        for (name, value) in context {
            self.buckets
                .entry(name.clone())
                .or_default()
                .entry(value.clone())
                .or_default()
                .insert(key);
        }
    }

    pub fn remove(&mut self, key: MemoryKey, context: &Context) {
        for (name, value) in context {
            let Some(values) = self.buckets.get_mut(name) else {
                continue;
            };
            if let Some(bucket) = values.get_mut(value) {
                bucket.remove(&key);
                if bucket.is_empty() {
                    values.remove(value);
                }
            }
            if values.is_empty() {
                self.buckets.remove(name);
            }
        }
    }

    pub fn lookup(&self, name: &str, value: &ContextValue) -> Option<&BTreeSet<MemoryKey>> {
        self.buckets.get(name).and_then(|values| values.get(value))
    }

    pub fn contains(&self, name: &str, value: &ContextValue, key: MemoryKey) -> bool {
        self.lookup(name, value).is_some_and(|bucket| bucket.contains(&key))
    }
}
