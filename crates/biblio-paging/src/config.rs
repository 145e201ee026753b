//! Paging configuration, passed explicitly at construction.
//!
//! The core never reads ambient state: sort order, page size, and the
//! initial-load latency floor all arrive through [`PagingConfig`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default sort key used when a window is opened without one.
pub const DEFAULT_SORT_KEY: &str = "title";

/// Tunables for one paging window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    base_page_size: u32,
    /// Minimum wall-clock duration of an initial load, to avoid UI
    /// flicker on fast stores. Never applied to `load_more`.
    pub initial_load_floor: Option<Duration>,
    /// Sort key assumed until the first `initial_load(sort_key)`.
    pub default_sort_key: String,
}

impl PagingConfig {
    /// Build a config with the given base page size.
    ///
    /// A zero page size is a configuration error, rejected here so the
    /// cursor and buffer never have to re-validate it.
    pub fn new(base_page_size: u32) -> Result<Self, ConfigError> {
        if base_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(Self {
            base_page_size,
            initial_load_floor: None,
            default_sort_key: DEFAULT_SORT_KEY.to_string(),
        })
    }

    pub fn with_initial_load_floor(mut self, floor: Duration) -> Self {
        self.initial_load_floor = Some(floor);
        self
    }

    pub fn with_default_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.default_sort_key = sort_key.into();
        self
    }

    pub fn base_page_size(&self) -> u32 {
        self.base_page_size
    }

    /// Initial loads fetch three base pages at once, so the first
    /// backward scroll already has material without a second round
    /// trip.
    pub fn initial_page_size(&self) -> u32 {
        self.base_page_size * 3
    }

    /// Window capacity: the buffer never holds more than one initial
    /// page worth of items.
    pub fn window_capacity(&self) -> usize {
        self.initial_page_size() as usize
    }
}
