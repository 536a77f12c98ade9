//! In-memory cache of object detail records
//!
//! Published museum objects are immutable, so by default every successful
//! detail response is kept for the life of the process. A capacity bound
//! switches the cache to least-recently-used eviction.
//!
//! Concurrent writes for the same id store the same record, so the last
//! writer winning is harmless.

use dashmap::DashMap;
use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

use super::types::{ObjectId, ObjectRecord};
use crate::utils::OBJECT_CACHE_INITIAL_CAPACITY;

enum Store {
    Unbounded(DashMap<ObjectId, ObjectRecord>),
    Bounded(Mutex<LruCache<ObjectId, ObjectRecord>>),
}

/// Cache for `ObjectRecord` responses keyed by `ObjectId`
pub struct ObjectCache {
    store: Store,
}

impl ObjectCache {
    /// Create an unbounded cache with no eviction
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            store: Store::Unbounded(DashMap::with_capacity(OBJECT_CACHE_INITIAL_CAPACITY)),
        }
    }

    /// Create a cache holding at most `capacity` records
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            store: Store::Bounded(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Unbounded for `None`, LRU-bounded otherwise
    #[must_use]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<ObjectRecord> {
        match &self.store {
            Store::Unbounded(map) => map.get(&id).map(|entry| entry.value().clone()),
            Store::Bounded(lru) => lru.lock().get(&id).cloned(),
        }
    }

    pub fn insert(&self, id: ObjectId, record: ObjectRecord) {
        match &self.store {
            Store::Unbounded(map) => {
                map.insert(id, record);
            }
            Store::Bounded(lru) => {
                let displaced = lru.lock().push(id, record);
                if let Some((evicted, _)) = displaced.filter(|(key, _)| *key != id) {
                    debug!("Evicted object {evicted} from cache to make room for {id}");
                }
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        match &self.store {
            Store::Unbounded(map) => map.contains_key(&id),
            Store::Bounded(lru) => lru.lock().contains(&id),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Unbounded(map) => map.len(),
            Store::Bounded(lru) => lru.lock().len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached records
    pub fn clear(&self) {
        match &self.store {
            Store::Unbounded(map) => map.clear(),
            Store::Bounded(lru) => lru.lock().clear(),
        }
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
