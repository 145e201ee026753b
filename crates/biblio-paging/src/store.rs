//! The boundary trait all paging backends implement.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity key for window items.
///
/// The window buffer drops any incoming item whose key it already
/// holds, so keys must be stable for the lifetime of an item.
pub trait Keyed {
    type Key: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send;

    fn key(&self) -> Self::Key;
}

/// A page request computed by the cursor.
///
/// Page 0 is always requested at the initial (triple) size; every
/// other page at the base size. Stores lay pages out back to back
/// under that convention, so the slice offset of page `n >= 1` is
/// `(n + 2) * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Slice offset of this request under the back-to-back layout.
    pub fn offset(&self) -> usize {
        Self::offset_of(self.page, self.size)
    }

    /// Slice offset of page `page` requested at `size` items: 0 for
    /// the triple-sized page 0, `(page + 2) * size` afterwards.
    pub fn offset_of(page: u32, size: u32) -> usize {
        if page == 0 {
            0
        } else {
            (page as usize + 2) * size as usize
        }
    }
}

/// Errors from a page store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("network unavailable: {0}")]
    Network(String),
}

/// A backing store the coordinator pages over.
///
/// `fetch_page` must return items in a stable order for a fixed
/// `sort_key` and must be safe to call repeatedly with the same
/// arguments (idempotent read). The mutation methods are consumed, not
/// owned, by the paging core: the coordinator relays their outcome
/// into the error taxonomy without reordering or retrying.
#[async_trait]
pub trait PageStore: Send + Sync {
    type Item: Keyed + Clone + Send + Sync;

    /// Fetch one ordered page of items.
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort_key: &str,
    ) -> Result<Vec<Self::Item>, StoreError>;

    /// Total number of items visible under the given sort key.
    async fn count(&self, sort_key: &str) -> Result<usize, StoreError>;

    /// Insert a new item.
    async fn insert(&self, item: Self::Item) -> Result<(), StoreError>;

    /// Update an existing item in place.
    async fn update(&self, item: Self::Item) -> Result<(), StoreError>;

    /// Delete by id. Returns whether anything was deleted.
    async fn delete_by_id(&self, id: <Self::Item as Keyed>::Key) -> Result<bool, StoreError>;
}
