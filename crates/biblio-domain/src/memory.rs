//! Seeded in-memory page store.
//!
//! Stands in for the persistent catalog: same `PageStore` contract,
//! no I/O. [`KindScope`] narrows a shared library to one category so
//! each category can drive its own independent paging window.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use biblio_paging::{PageRequest, PageStore, StoreError};
use chrono::{Duration, Utc};

use crate::item::{Book, Disk, DiskType, ItemId, ItemKind, LibraryItem, Month, Newspaper};

/// In-memory catalog of library items.
///
/// Reads are idempotent and stable: sorting is performed with a stable
/// sort over a snapshot, with insertion order breaking ties, so a
/// fixed sort key always yields the same sequence.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    items: RwLock<Vec<LibraryItem>>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<LibraryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// A catalog pre-populated with a few dozen items per category,
    /// newest first.
    pub fn seeded() -> Self {
        let mut items = vec![
            book(1001, "The Jungle Book", true, 202, "Rudyard Kipling"),
            book(1002, "War and Peace", true, 1225, "Leo Tolstoy"),
            book(1003, "Crime and Punishment", false, 672, "Fyodor Dostoevsky"),
            book(1004, "The Master and Margarita", true, 448, "Mikhail Bulgakov"),
            newspaper(2001, "Rural Life", true, 794, Month::March),
            newspaper(2002, "Arguments and Facts", false, 123, Month::April),
            newspaper(2003, "Kommersant", true, 456, Month::January),
            newspaper(2004, "Izvestia", true, 789, Month::October),
            disk(3001, "Deadpool & Wolverine", true, DiskType::Dvd),
            disk(3002, "Best Songs 2023", false, DiskType::Cd),
            disk(3003, "Star Wars: Episode IX", true, DiskType::Dvd),
            disk(3004, "Classical Music", true, DiskType::Cd),
        ];
        for i in 1..=50u32 {
            items.push(book(
                1100 + i,
                &format!("Book {i:02}"),
                true,
                200 + i,
                &format!("Author {i:02}"),
            ));
            items.push(newspaper(
                2100 + i,
                &format!("Newspaper {i:02}"),
                true,
                i,
                Month::ALL[(i as usize - 1) % 12],
            ));
            items.push(disk(
                3100 + i,
                &format!("Disk {i:02}"),
                true,
                if i % 2 == 0 { DiskType::Cd } else { DiskType::Dvd },
            ));
        }
        backdate(&mut items);
        Self::with_items(items)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<LibraryItem>> {
        self.items.read().expect("library lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<LibraryItem>> {
        self.items.write().expect("library lock poisoned")
    }

    fn sorted(&self, sort_key: &str, kind: Option<ItemKind>) -> Vec<LibraryItem> {
        let mut items: Vec<LibraryItem> = self
            .read()
            .iter()
            .filter(|item| kind.is_none_or(|k| item.kind() == k))
            .cloned()
            .collect();
        // Unknown keys fall back to title order.
        match sort_key.to_lowercase().as_str() {
            "date" | "createdat" => items.sort_by(|a, b| b.created().cmp(&a.created())),
            "author" => items.sort_by(|a, b| author_key(a).cmp(author_key(b))),
            "id" => items.sort_by_key(LibraryItem::id),
            _ => items.sort_by(|a, b| a.title().cmp(b.title())),
        }
        items
    }
}

/// Books sort by author; other categories fall back to their title, as
/// the catalog UI does.
fn author_key(item: &LibraryItem) -> &str {
    match item {
        LibraryItem::Book(b) => &b.author,
        other => other.title(),
    }
}

/// Stamp creation times so that list order is newest-first.
fn backdate(items: &mut [LibraryItem]) {
    let base = Utc::now();
    for (i, item) in items.iter_mut().enumerate() {
        let created = base - Duration::seconds(i as i64);
        match item {
            LibraryItem::Book(b) => b.created = created,
            LibraryItem::Newspaper(n) => n.created = created,
            LibraryItem::Disk(d) => d.created = created,
        }
    }
}

fn book(id: ItemId, title: &str, available: bool, pages: u32, author: &str) -> LibraryItem {
    LibraryItem::Book(Book {
        id,
        title: title.into(),
        available,
        pages,
        author: author.into(),
        created: Utc::now(),
    })
}

fn newspaper(id: ItemId, title: &str, available: bool, issue: u32, month: Month) -> LibraryItem {
    LibraryItem::Newspaper(Newspaper {
        id,
        title: title.into(),
        available,
        issue_number: issue,
        month,
        created: Utc::now(),
    })
}

fn disk(id: ItemId, title: &str, available: bool, kind: DiskType) -> LibraryItem {
    LibraryItem::Disk(Disk {
        id,
        title: title.into(),
        available,
        kind,
        created: Utc::now(),
    })
}

fn page_slice(items: Vec<LibraryItem>, page: u32, page_size: u32) -> Vec<LibraryItem> {
    let offset = PageRequest::offset_of(page, page_size);
    items
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect()
}

#[async_trait]
impl PageStore for InMemoryLibrary {
    type Item = LibraryItem;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort_key: &str,
    ) -> Result<Vec<LibraryItem>, StoreError> {
        Ok(page_slice(self.sorted(sort_key, None), page, page_size))
    }

    async fn count(&self, _sort_key: &str) -> Result<usize, StoreError> {
        Ok(self.read().len())
    }

    async fn insert(&self, item: LibraryItem) -> Result<(), StoreError> {
        let mut items = self.write();
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(StoreError::Storage(format!(
                "item {} already exists",
                item.id()
            )));
        }
        items.push(item);
        Ok(())
    }

    async fn update(&self, item: LibraryItem) -> Result<(), StoreError> {
        let mut items = self.write();
        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(StoreError::NotFound(item.id().to_string())),
        }
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.write();
        let before = items.len();
        items.retain(|item| item.id() != id);
        Ok(items.len() < before)
    }
}

/// A single-category view over a shared [`InMemoryLibrary`].
///
/// Filtering happens before sorting and slicing, so page math within a
/// category is exact; a window over books never sees newspaper rows
/// and never skips book rows.
#[derive(Debug, Clone)]
pub struct KindScope {
    library: Arc<InMemoryLibrary>,
    kind: ItemKind,
}

impl KindScope {
    pub fn new(library: Arc<InMemoryLibrary>, kind: ItemKind) -> Self {
        Self { library, kind }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

#[async_trait]
impl PageStore for KindScope {
    type Item = LibraryItem;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort_key: &str,
    ) -> Result<Vec<LibraryItem>, StoreError> {
        Ok(page_slice(
            self.library.sorted(sort_key, Some(self.kind)),
            page,
            page_size,
        ))
    }

    async fn count(&self, _sort_key: &str) -> Result<usize, StoreError> {
        Ok(self
            .library
            .read()
            .iter()
            .filter(|item| item.kind() == self.kind)
            .count())
    }

    async fn insert(&self, item: LibraryItem) -> Result<(), StoreError> {
        self.library.insert(item).await
    }

    async fn update(&self, item: LibraryItem) -> Result<(), StoreError> {
        self.library.update(item).await
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        self.library.delete_by_id(id).await
    }
}
