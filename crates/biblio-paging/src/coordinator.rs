//! Orchestrates loads for one window against a page store.

use std::sync::{Mutex, MutexGuard};

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::config::PagingConfig;
use crate::cursor::PageCursor;
use crate::error::{Envelope, LibraryError, LoadError};
use crate::store::{Keyed, PageRequest, PageStore, StoreError};
use crate::window::WindowBuffer;

struct WindowState<T: Keyed> {
    cursor: PageCursor,
    window: WindowBuffer<T>,
}

/// Releases the cursor's single-flight guard when the load ends, even
/// when the caller drops the future at the await point.
struct FlightGuard<'a, T: Keyed> {
    state: &'a Mutex<WindowState<T>>,
}

impl<T: Keyed> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.cursor.release();
        }
    }
}

/// Drives initial and directional loads for one typed window.
///
/// The coordinator is the only mutator of its cursor/buffer pair, and
/// the store call is its only await point. State mutations happen
/// synchronously after that point, so a load commits entirely or not
/// at all: failures and cancellations leave the window exactly as it
/// was. Store failures are classified into [`LibraryError`] here;
/// cancellation passes through as [`LoadError::Cancelled`].
///
/// Independent windows get independent coordinators and may load
/// concurrently; within one coordinator the cursor's single-flight
/// guard rejects overlapping loads with an empty success.
pub struct LoadCoordinator<S: PageStore> {
    store: S,
    config: PagingConfig,
    item_type: String,
    state: Mutex<WindowState<S::Item>>,
}

impl<S: PageStore> LoadCoordinator<S> {
    /// Build a coordinator over an injected store. `item_type` is the
    /// label carried by classified errors, e.g. `"book"`.
    pub fn new(store: S, config: PagingConfig, item_type: impl Into<String>) -> Self {
        let cursor = PageCursor::new(&config, config.default_sort_key.clone());
        let window = WindowBuffer::new(config.window_capacity());
        Self {
            store,
            config,
            item_type: item_type.into(),
            state: Mutex::new(WindowState { cursor, window }),
        }
    }

    /// Load the first window under `sort_key`, replacing any existing
    /// content. Refreshes the total count; this is the only operation
    /// that does.
    pub async fn initial_load(&self, sort_key: &str) -> Envelope<Vec<S::Item>> {
        self.initial_load_with(sort_key, &CancelToken::new()).await
    }

    /// Cancellable variant of [`Self::initial_load`].
    pub async fn initial_load_with(
        &self,
        sort_key: &str,
        cancel: &CancelToken,
    ) -> Envelope<Vec<S::Item>> {
        let request = {
            let mut state = self.lock_state();
            if !state.cursor.try_acquire() {
                debug!(sort_key, "initial load rejected: a load is in flight");
                return Ok(Vec::new());
            }
            state.cursor.initial_request()
        };
        let _flight = FlightGuard { state: &self.state };

        let started = Instant::now();
        match self.fetch_initial(request, sort_key).await {
            Ok((total_count, items)) => {
                if let Some(floor) = self.config.initial_load_floor {
                    let elapsed = started.elapsed();
                    if elapsed < floor {
                        sleep(floor - elapsed).await;
                    }
                }
                if cancel.is_cancelled() {
                    debug!(sort_key, "initial load cancelled before commit");
                    return Err(LoadError::Cancelled);
                }
                let returned_count = items.len();
                let mut state = self.lock_state();
                state.window.reset();
                state.window.merge(true, items);
                state
                    .cursor
                    .commit_initial(sort_key, request, total_count, returned_count);
                debug!(
                    sort_key,
                    returned_count,
                    total_count,
                    is_last = state.cursor.is_last_page(),
                    "initial load committed"
                );
                Ok(state.window.snapshot())
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return Err(LoadError::Cancelled);
                }
                warn!(sort_key, error = %err, "initial load failed");
                let mut state = self.lock_state();
                state.cursor.reset(sort_key);
                state.window.reset();
                Err(self.classify_load(err).into())
            }
        }
    }

    /// Load one more page ahead of (`forward`) or behind the window.
    ///
    /// Returns the newly added items for UI diffing. At a window edge,
    /// or while another load is in flight, this is an empty success
    /// that never contacts the store.
    pub async fn load_more(&self, forward: bool) -> Envelope<Vec<S::Item>> {
        self.load_more_with(forward, &CancelToken::new()).await
    }

    /// Cancellable variant of [`Self::load_more`].
    pub async fn load_more_with(
        &self,
        forward: bool,
        cancel: &CancelToken,
    ) -> Envelope<Vec<S::Item>> {
        let (request, sort_key) = {
            let mut state = self.lock_state();
            if state.cursor.is_in_flight() {
                debug!(forward, "load rejected: a load is in flight");
                return Ok(Vec::new());
            }
            let Some(request) = state.cursor.request_next_page(forward) else {
                // Edge no-op: the guard stays untouched.
                debug!(
                    forward,
                    page = state.cursor.page_number(),
                    "load skipped: window edge reached"
                );
                return Ok(Vec::new());
            };
            state.cursor.try_acquire();
            (request, state.cursor.sort_key().to_string())
        };
        let _flight = FlightGuard { state: &self.state };

        debug!(forward, page = request.page, size = request.size, "loading page");
        match self
            .store
            .fetch_page(request.page, request.size, &sort_key)
            .await
        {
            Ok(items) => {
                if cancel.is_cancelled() {
                    debug!(forward, "load cancelled before commit");
                    return Err(LoadError::Cancelled);
                }
                let returned_count = items.len();
                let mut state = self.lock_state();
                let added = state.window.merge(forward, items);
                state.cursor.commit(forward, request, returned_count);
                debug!(
                    forward,
                    page = request.page,
                    returned_count,
                    added = added.len(),
                    window_len = state.window.len(),
                    is_last = state.cursor.is_last_page(),
                    "load committed"
                );
                Ok(added)
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return Err(LoadError::Cancelled);
                }
                warn!(forward, page = request.page, error = %err, "load failed");
                Err(self.classify_load(err).into())
            }
        }
    }

    /// Immutable copy of the current window, in store order.
    pub fn snapshot(&self) -> Vec<S::Item> {
        self.lock_state().window.snapshot()
    }

    /// Whether the window currently spans the start of the dataset.
    pub fn is_at_start(&self) -> bool {
        self.lock_state().cursor.is_first_page()
    }

    /// Whether the window currently spans the end of the dataset.
    pub fn is_at_end(&self) -> bool {
        self.lock_state().cursor.is_last_page()
    }

    /// Last known total item count, refreshed on initial load.
    pub fn total_count(&self) -> usize {
        self.lock_state().cursor.total_count()
    }

    pub fn window_len(&self) -> usize {
        self.lock_state().window.len()
    }

    /// The injected store, for direct (non-paged) queries.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Relay an insert to the store. The window is not updated; the
    /// caller refreshes when it wants the new item to appear.
    pub async fn insert(&self, item: S::Item) -> Result<(), LibraryError> {
        self.store.insert(item).await.map_err(|err| match err {
            StoreError::Network(detail) => LibraryError::NetworkUnavailable { detail },
            _ => LibraryError::SaveFailed {
                item_type: self.item_type.clone(),
            },
        })
    }

    /// Relay an update to the store.
    pub async fn update(&self, item: S::Item) -> Result<(), LibraryError> {
        self.store.update(item).await.map_err(|err| match err {
            StoreError::Network(detail) => LibraryError::NetworkUnavailable { detail },
            _ => LibraryError::UpdateFailed {
                item_type: self.item_type.clone(),
            },
        })
    }

    /// Relay a delete to the store. Returns whether anything was
    /// deleted.
    pub async fn delete(&self, id: <S::Item as Keyed>::Key) -> Result<bool, LibraryError> {
        self.store.delete_by_id(id).await.map_err(|err| match err {
            StoreError::Network(detail) => LibraryError::NetworkUnavailable { detail },
            _ => LibraryError::DeleteFailed {
                item_id: id.to_string(),
            },
        })
    }

    async fn fetch_initial(
        &self,
        request: PageRequest,
        sort_key: &str,
    ) -> Result<(usize, Vec<S::Item>), StoreError> {
        let total_count = self.store.count(sort_key).await?;
        let items = self
            .store
            .fetch_page(request.page, request.size, sort_key)
            .await?;
        Ok((total_count, items))
    }

    fn classify_load(&self, err: StoreError) -> LibraryError {
        match err {
            StoreError::Network(detail) => LibraryError::NetworkUnavailable { detail },
            _ => LibraryError::LoadFailed {
                item_type: self.item_type.clone(),
            },
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, WindowState<S::Item>> {
        self.state.lock().expect("window state lock poisoned")
    }
}
