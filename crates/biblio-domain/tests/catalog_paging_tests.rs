//! End-to-end paging over the in-memory catalog: the canonical
//! 35-item walkthrough, sort-change refresh, and independent
//! per-category windows.

use std::sync::Arc;

use biblio_domain::{InMemoryLibrary, ItemKind, KindScope, LibraryItem};
use biblio_paging::{Keyed, LoadCoordinator, PagingConfig};
use chrono::Utc;

fn titled_books(n: u32) -> Vec<LibraryItem> {
    (1..=n)
        .map(|i| {
            LibraryItem::Book(biblio_domain::Book {
                id: i,
                title: format!("Book {i:03}"),
                available: true,
                pages: 100 + i,
                author: format!("Author {i:03}"),
                created: Utc::now(),
            })
        })
        .collect()
}

fn titles(items: &[LibraryItem]) -> Vec<&str> {
    items.iter().map(LibraryItem::title).collect()
}

/// Base page size 10 over 35 titles: initial load materializes a full
/// triple page and is not the end of the dataset.
#[tokio::test]
async fn initial_window_over_35_titles() {
    let store = InMemoryLibrary::with_items(titled_books(35));
    let coord = LoadCoordinator::new(store, PagingConfig::new(10).unwrap(), "book");

    let snapshot = coord.initial_load("title").await.unwrap();
    assert_eq!(snapshot.len(), 30);
    assert_eq!(snapshot[0].title(), "Book 001");
    assert!(coord.is_at_start());
    assert!(!coord.is_at_end());
    assert_eq!(coord.total_count(), 35);
}

/// Scrolling to the end: the short page flips the end flag, the head
/// is trimmed to capacity, and every one of the 35 titles has been
/// seen exactly once.
#[tokio::test]
async fn forward_scroll_reaches_the_end_without_duplicates() {
    let store = InMemoryLibrary::with_items(titled_books(35));
    let coord = LoadCoordinator::new(store, PagingConfig::new(10).unwrap(), "book");

    let initial = coord.initial_load("title").await.unwrap();
    let added = coord.load_more(true).await.unwrap();
    assert_eq!(
        titles(&added),
        vec!["Book 031", "Book 032", "Book 033", "Book 034", "Book 035"]
    );
    assert!(coord.is_at_end());

    let snapshot = coord.snapshot();
    assert_eq!(snapshot.len(), 30);
    assert_eq!(snapshot[0].title(), "Book 006");

    let mut seen: Vec<u32> = initial.iter().chain(added.iter()).map(|i| i.key()).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 35);

    // Forward again: already at the end, empty success, no fetch.
    let extra = coord.load_more(true).await.unwrap();
    assert!(extra.is_empty());

    // And back: the evicted head rows return, deduplicated against the
    // still-held middle of the window.
    let restored = coord.load_more(false).await.unwrap();
    assert_eq!(restored.len(), 5);
    assert_eq!(coord.snapshot()[0].title(), "Book 001");
}

#[tokio::test]
async fn backward_at_the_start_changes_nothing() {
    let store = InMemoryLibrary::with_items(titled_books(35));
    let coord = LoadCoordinator::new(store, PagingConfig::new(10).unwrap(), "book");
    coord.initial_load("title").await.unwrap();
    let before = coord.snapshot();

    let added = coord.load_more(false).await.unwrap();
    assert!(added.is_empty());
    assert_eq!(coord.snapshot(), before);
    assert!(coord.is_at_start());
}

/// Changing the sort key rebuilds the window from scratch.
#[tokio::test]
async fn sort_change_refreshes_the_window() {
    let store = Arc::new(InMemoryLibrary::seeded());
    let coord = LoadCoordinator::new(
        KindScope::new(Arc::clone(&store), ItemKind::Book),
        PagingConfig::new(10).unwrap(),
        "book",
    );

    let by_title = coord.initial_load("title").await.unwrap();
    coord.load_more(true).await.unwrap();

    let by_date = coord.initial_load("date").await.unwrap();
    assert_eq!(by_date.len(), 30);
    assert!(coord.is_at_start());
    assert_ne!(titles(&by_title), titles(&by_date));
}

/// Each category drives its own coordinator over the same shared
/// catalog; concurrent loads do not interfere.
#[tokio::test]
async fn per_category_windows_load_independently() {
    let store = Arc::new(InMemoryLibrary::seeded());
    let config = PagingConfig::new(10).unwrap();
    let books = LoadCoordinator::new(
        KindScope::new(Arc::clone(&store), ItemKind::Book),
        config.clone(),
        "book",
    );
    let newspapers = LoadCoordinator::new(
        KindScope::new(Arc::clone(&store), ItemKind::Newspaper),
        config.clone(),
        "newspaper",
    );
    let disks = LoadCoordinator::new(
        KindScope::new(Arc::clone(&store), ItemKind::Disk),
        config,
        "disk",
    );

    let (b, n, d) = tokio::join!(
        books.initial_load("title"),
        newspapers.initial_load("title"),
        disks.initial_load("title"),
    );
    let (b, n, d) = (b.unwrap(), n.unwrap(), d.unwrap());
    assert!(b.iter().all(|i| i.kind() == ItemKind::Book));
    assert!(n.iter().all(|i| i.kind() == ItemKind::Newspaper));
    assert!(d.iter().all(|i| i.kind() == ItemKind::Disk));
    assert_eq!((b.len(), n.len(), d.len()), (30, 30, 30));

    // 54 items per category in the seeded catalog.
    newspapers.load_more(true).await.unwrap();
    assert_eq!(newspapers.window_len(), 30);
    assert_eq!(newspapers.total_count(), 54);
    assert!(books.is_at_start());
}

/// Deleting through the coordinator relays to the shared store; the
/// window refreshes on the next initial load.
#[tokio::test]
async fn delete_then_refresh_shrinks_the_dataset() {
    let store = InMemoryLibrary::with_items(titled_books(35));
    let coord = LoadCoordinator::new(store, PagingConfig::new(10).unwrap(), "book");
    coord.initial_load("title").await.unwrap();

    assert!(coord.delete(35).await.unwrap());
    assert!(!coord.delete(35).await.unwrap());

    let snapshot = coord.initial_load("title").await.unwrap();
    assert_eq!(coord.total_count(), 34);
    assert_eq!(snapshot.len(), 30);
    // 34 items now: the initial 30 no longer reach the end, one more
    // forward load does.
    assert!(!coord.is_at_end());
    let added = coord.load_more(true).await.unwrap();
    assert_eq!(added.len(), 4);
    assert!(coord.is_at_end());
}
