//! biblio-domain: library item models and the in-memory page store.
//!
//! The catalog holds three item categories:
//! - [`Book`]: pages and author, lendable and readable on site
//! - [`Newspaper`]: issue number and month, reading room only
//! - [`Disk`]: CD/DVD, lendable but not usable on site
//!
//! [`LibraryItem`] is the closed sum over the three; it implements
//! `biblio_paging::Keyed` so any category (or the unified stream) can
//! drive a paging window. [`InMemoryLibrary`] is a seeded `PageStore`
//! backend; [`KindScope`] narrows one to a single category.

pub mod item;
pub mod memory;

pub use item::*;
pub use memory::*;
