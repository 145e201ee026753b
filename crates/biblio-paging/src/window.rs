//! Bounded, ordered, deduplicated window over the loaded range.

use std::collections::{HashSet, VecDeque};

use crate::store::Keyed;

/// The in-memory window of materialized items.
///
/// Items keep the store's order for the currently spanned range: they
/// are only ever appended, prepended, or trimmed, never reordered.
/// When a merge would exceed `capacity`, the edge opposite the scroll
/// direction is trimmed. The access pattern is strictly positional, so
/// this O(1) positional trim replaces a general eviction policy: no
/// usage tracking is needed.
#[derive(Debug, Clone)]
pub struct WindowBuffer<T: Keyed> {
    items: VecDeque<T>,
    keys: HashSet<T::Key>,
    capacity: usize,
}

impl<T: Keyed + Clone> WindowBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            keys: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Merge a fetched page into the window and return the items that
    /// were actually added, in store order, for UI diffing.
    ///
    /// Incoming items whose identity key is already present are
    /// dropped before anything else; a page boundary that shifted
    /// between calls therefore cannot double-count. Eviction then
    /// trims at most as many items as were added, from the head on a
    /// forward merge and from the tail on a backward one, so the
    /// window never exceeds its capacity.
    pub fn merge(&mut self, forward: bool, items: Vec<T>) -> Vec<T> {
        let mut added: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            // insert() also filters duplicates within the batch itself
            if self.keys.insert(item.key()) {
                added.push(item);
            }
        }

        if forward {
            for item in &added {
                self.items.push_back(item.clone());
            }
            let trim = self
                .items
                .len()
                .saturating_sub(self.capacity)
                .min(added.len());
            for _ in 0..trim {
                if let Some(evicted) = self.items.pop_front() {
                    self.keys.remove(&evicted.key());
                }
            }
        } else {
            for item in added.iter().rev() {
                self.items.push_front(item.clone());
            }
            let trim = self
                .items
                .len()
                .saturating_sub(self.capacity)
                .min(added.len());
            for _ in 0..trim {
                if let Some(evicted) = self.items.pop_back() {
                    self.keys.remove(&evicted.key());
                }
            }
        }

        added
    }

    /// Immutable copy of the window for rendering. The live buffer is
    /// never exposed.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Empty the window. Used on sort change and error-triggered
    /// refresh.
    pub fn reset(&mut self) {
        self.items.clear();
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.keys.contains(key)
    }
}
