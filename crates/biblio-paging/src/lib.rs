//! biblio-paging: bidirectional windowed pagination core.
//!
//! Sits between a scrollable list and a backing item store. It presents
//! a bounded, typed window over an arbitrarily large dataset, fetching
//! pages as the viewport approaches either edge and evicting the
//! opposite edge to bound memory:
//! - [`PageCursor`]: page anchor, total count, first/last flags,
//!   single-flight guard
//! - [`WindowBuffer`]: ordered, deduplicated, capacity-bounded items
//! - [`LoadCoordinator`]: orchestrates loads against a [`PageStore`],
//!   classifies failures, honors cancellation
//!
//! The core is type-parametric: each item category instantiates its own
//! `(cursor, buffer)` pair over its concrete item type. Independent
//! windows share no state and may load concurrently.

pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod cursor;
pub mod error;
pub mod store;
pub mod window;

pub use cancel::*;
pub use config::*;
pub use coordinator::*;
pub use cursor::*;
pub use error::*;
pub use store::*;
pub use window::*;
