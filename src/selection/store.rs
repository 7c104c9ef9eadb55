//! The authoritative selection set.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Set of selected record ids shared by bulk aggregation and manual toggles.
///
/// Every operation runs under one lock, so concurrent adds never lose
/// updates and a remove ordered after an add always wins.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selected: Mutex<HashSet<u64>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `ids` into the selection. Returns the ids that were not already selected.
    pub fn add<I>(&self, ids: I) -> HashSet<u64>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut selected = self.selected.lock();
        ids.into_iter().filter(|id| selected.insert(*id)).collect()
    }

    /// Union `ids` only if `admit` still holds once the lock is taken.
    ///
    /// Returns `None` when `admit` rejected the merge.
    pub fn add_if<I, F>(&self, ids: I, admit: F) -> Option<HashSet<u64>>
    where
        I: IntoIterator<Item = u64>,
        F: FnOnce() -> bool,
    {
        let mut selected = self.selected.lock();
        if !admit() {
            return None;
        }
        Some(ids.into_iter().filter(|id| selected.insert(*id)).collect())
    }

    /// Deselect `id`. Returns whether it was selected; absent ids are a no-op.
    pub fn remove(&self, id: u64) -> bool {
        self.selected.lock().remove(&id)
    }

    /// Flip membership of `id`. Returns `true` if it is selected afterwards.
    pub fn toggle(&self, id: u64) -> bool {
        let mut selected = self.selected.lock();
        if selected.remove(&id) {
            false
        } else {
            selected.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.selected.lock().contains(&id)
    }

    pub fn snapshot(&self) -> HashSet<u64> {
        self.selected.lock().clone()
    }

    pub fn clear(&self) {
        self.selected.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.selected.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.lock().is_empty()
    }
}
