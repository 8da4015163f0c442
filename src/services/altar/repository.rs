//! Ordered, deduplicated collection of observed altars.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use crate::services::altar::component::AltarComponent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// An entry with the same identity key already exists; nothing stored.
    Duplicate,
}

/// Altar components in insertion order, unique by identity key.
///
/// `clear` and `remove_where` hold the lock across invalidation and removal,
/// so readers never observe a half-cleared collection.
#[derive(Debug, Default)]
pub struct AltarRepository {
    entries: Mutex<Vec<Arc<AltarComponent>>>,
}

impl AltarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Arc<AltarComponent>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, component: AltarComponent) -> InsertOutcome {
        let mut entries = self.entries();
        if entries
            .iter()
            .any(|existing| existing.identity_key() == component.identity_key())
        {
            debug!(
                "[Repository] Duplicate altar {} rejected",
                component.fingerprint()
            );
            return InsertOutcome::Duplicate;
        }

        info!(
            "[Repository] Added {} altar {} (element {})",
            component.altar_type(),
            component.fingerprint(),
            component.container()
        );
        entries.push(Arc::new(component));
        InsertOutcome::Added
    }

    pub fn contains_key(&self, identity_key: &str) -> bool {
        self.entries()
            .iter()
            .any(|existing| existing.identity_key() == identity_key)
    }

    /// Ordered copy of the current entries.
    pub fn snapshot(&self) -> Vec<Arc<AltarComponent>> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate and remove every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries();
        for component in entries.iter() {
            component.invalidate();
        }
        let removed = entries.len();
        entries.clear();
        if removed > 0 {
            debug!("[Repository] Cleared {} altars", removed);
        }
        removed
    }

    /// Invalidate and remove entries matching `predicate`. Returns the count.
    pub fn remove_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&AltarComponent) -> bool,
    {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|component| {
            if predicate(component) {
                component.invalidate();
                false
            } else {
                true
            }
        });
        let removed = before - entries.len();
        if removed > 0 {
            debug!("[Repository] Removed {} altars", removed);
        }
        removed
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
