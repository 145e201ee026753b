//! Library item domain models.

use biblio_paging::Keyed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric item identifier assigned by the store.
pub type ItemId = u32;

/// Issue month for newspapers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// Physical disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiskType {
    Cd,
    Dvd,
}

impl DiskType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DiskType::Cd => "CD",
            DiskType::Dvd => "DVD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: ItemId,
    pub title: String,
    pub available: bool,
    pub pages: u32,
    pub author: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newspaper {
    pub id: ItemId,
    pub title: String,
    pub available: bool,
    pub issue_number: u32,
    pub month: Month,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub id: ItemId,
    pub title: String,
    pub available: bool,
    pub kind: DiskType,
    pub created: DateTime<Utc>,
}

/// Item category, used to scope stores and label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Book,
    Newspaper,
    Disk,
}

impl ItemKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Book => "book",
            ItemKind::Newspaper => "newspaper",
            ItemKind::Disk => "disk",
        }
    }
}

/// The closed set of items the library holds.
///
/// Categories are a tagged variant, not a trait object: each paging
/// window instantiates the generic core over this type (or over a
/// single category via a kind-scoped store), so no dynamic dispatch is
/// involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LibraryItem {
    Book(Book),
    Newspaper(Newspaper),
    Disk(Disk),
}

impl LibraryItem {
    pub fn id(&self) -> ItemId {
        match self {
            LibraryItem::Book(b) => b.id,
            LibraryItem::Newspaper(n) => n.id,
            LibraryItem::Disk(d) => d.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            LibraryItem::Book(b) => &b.title,
            LibraryItem::Newspaper(n) => &n.title,
            LibraryItem::Disk(d) => &d.title,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            LibraryItem::Book(b) => b.available,
            LibraryItem::Newspaper(n) => n.available,
            LibraryItem::Disk(d) => d.available,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        match self {
            LibraryItem::Book(b) => b.available = available,
            LibraryItem::Newspaper(n) => n.available = available,
            LibraryItem::Disk(d) => d.available = available,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        match self {
            LibraryItem::Book(b) => b.created,
            LibraryItem::Newspaper(n) => n.created,
            LibraryItem::Disk(d) => d.created,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            LibraryItem::Book(_) => ItemKind::Book,
            LibraryItem::Newspaper(_) => ItemKind::Newspaper,
            LibraryItem::Disk(_) => ItemKind::Disk,
        }
    }

    /// One-line summary for list rows.
    pub fn brief_info(&self) -> String {
        format!("{} (id {})", self.title(), self.id())
    }

    /// Full description for the detail view.
    pub fn detailed_info(&self) -> String {
        let availability = if self.is_available() {
            "available"
        } else {
            "checked out"
        };
        match self {
            LibraryItem::Book(b) => format!(
                "book: {} ({} pages) by {}, id {}, {}",
                b.title, b.pages, b.author, b.id, availability
            ),
            LibraryItem::Newspaper(n) => format!(
                "issue {} ({}) of {}, id {}, {}",
                n.issue_number,
                n.month.display_name(),
                n.title,
                n.id,
                availability
            ),
            LibraryItem::Disk(d) => format!(
                "{} {}, id {}, {}",
                d.kind.display_name(),
                d.title,
                d.id,
                availability
            ),
        }
    }

    /// Books and disks may leave the building; newspapers may not.
    pub fn can_be_taken_home(&self) -> bool {
        !matches!(self, LibraryItem::Newspaper(_))
    }

    /// Books and newspapers may be used in the reading room; disks may
    /// not.
    pub fn can_be_read_in_library(&self) -> bool {
        !matches!(self, LibraryItem::Disk(_))
    }
}

impl Keyed for LibraryItem {
    type Key = ItemId;

    fn key(&self) -> ItemId {
        self.id()
    }
}
