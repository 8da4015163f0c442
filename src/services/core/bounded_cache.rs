//! Append-only cache with a hard entry cap.
//!
//! Once full, new keys are not stored and callers recompute on every lookup.
//! Nothing is ever evicted, so memory stays bounded without an eviction policy.
//! Each cache owns its own lock; there is no shared global lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    store: Mutex<HashMap<K, V>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            store: Mutex::new(HashMap::new()),
        }
    }

    fn store(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store().get(key).cloned()
    }

    /// Store `value` under `key`.
    ///
    /// Existing keys are overwritten even when full. Returns `false` when the
    /// cache is at capacity and the key was not stored.
    pub fn insert(&self, key: K, value: V) -> bool {
        let mut store = self.store();
        if store.len() >= self.capacity && !store.contains_key(&key) {
            return false;
        }
        store.insert(key, value);
        true
    }

    /// Store `value` only if `key` is absent. Returns `true` when this call
    /// added the entry.
    pub fn insert_new(&self, key: K, value: V) -> bool {
        let mut store = self.store();
        if store.contains_key(&key) || store.len() >= self.capacity {
            return false;
        }
        store.insert(key, value);
        true
    }

    /// Cached value, or `compute()` stored (capacity permitting) and returned.
    ///
    /// The lock is not held while computing. Two callers may both miss and
    /// both compute; `compute` must be deterministic.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.store().clear();
    }
}

#[cfg(test)]
#[path = "tests/bounded_cache_tests.rs"]
mod tests;
