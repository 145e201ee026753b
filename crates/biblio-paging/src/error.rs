//! Error taxonomy for the paging core.
//!
//! Store-level failures are caught at the coordinator boundary and
//! classified into [`LibraryError`]; nothing below that boundary is
//! exposed to callers. Cancellation is the single signal that passes
//! through unconverted, as [`LoadError::Cancelled`].

use serde::{Deserialize, Serialize};

/// Classified failure kinds surfaced to callers.
///
/// This set is closed: every core operation reports exactly one of
/// these, so the caller never branches on raw store error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum LibraryError {
    #[error("failed to load {item_type} items")]
    LoadFailed { item_type: String },

    #[error("failed to save {item_type}")]
    SaveFailed { item_type: String },

    #[error("failed to delete item {item_id}")]
    DeleteFailed { item_id: String },

    #[error("failed to update {item_type}")]
    UpdateFailed { item_type: String },

    #[error("network unavailable: {detail}")]
    NetworkUnavailable { detail: String },
}

/// Outcome of a coordinator load operation.
///
/// Either a classified [`LibraryError`] or a caller-requested
/// cancellation. A cancelled load is not a failure: it is never
/// retried by the core and never converted into the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("load cancelled")]
    Cancelled,
}

/// Uniform success/failure wrapper returned by every load operation.
pub type Envelope<T> = Result<T, LoadError>;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base page size must be positive")]
    ZeroPageSize,
}
