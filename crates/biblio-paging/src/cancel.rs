//! Cooperative cancellation for in-flight loads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation handle shared between a caller and the
/// coordinator.
///
/// The coordinator checks the token once, between the store call
/// returning and the commit; a cancelled load therefore commits
/// nothing. Cancellation is level-triggered and sticky: once cancelled,
/// a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
