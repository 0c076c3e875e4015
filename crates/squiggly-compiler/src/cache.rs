//! Compilation cache keyed by trimmed filter text.
//!
//! Entries are shared `Arc<[SelectionNode]>` lists. Concurrent compiles of
//! the same text may both miss and both store; the last writer wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use squiggly_core::SelectionNode;

/// A compiled filter: one root per `|` section.
pub type CachedNodes = Arc<[SelectionNode]>;

/// Storage for compiled filters.
pub trait NodeCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CachedNodes>;

    fn put(&self, key: String, value: CachedNodes);

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// In-process cache. With a capacity, the oldest insertion is evicted first.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<IndexMap<String, CachedNodes>>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero capacity stores nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, CachedNodes>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NodeCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedNodes> {
        let found = self.lock().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    fn put(&self, key: String, value: CachedNodes) {
        if self.capacity == Some(0) {
            return;
        }
        let mut entries = self.lock();
        entries.insert(key, value);
        if let Some(capacity) = self.capacity {
            while entries.len() > capacity {
                entries.shift_remove_index(0);
            }
        }
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Never stores anything; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl NodeCache for NoCache {
    fn get(&self, _key: &str) -> Option<CachedNodes> {
        None
    }

    fn put(&self, _key: String, _value: CachedNodes) {}
}
