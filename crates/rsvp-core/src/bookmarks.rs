//! Named reading positions.
//!
//! The ledger only lives in memory. Persisting it is the settings layer's job:
//! it stores [`BookmarkLedger::list`] and rebuilds the ledger with
//! [`BookmarkLedger::from_bookmarks`] at startup.

use crate::error::{EngineError, Result};

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookmark {
    pub name: String,
    pub token_index: usize,
    /// Caller clock reading at creation, in milliseconds.
    pub created_at_ms: u64,
}

/// Bookmarks unique by name, listed in creation order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BookmarkLedger {
    entries: Vec<Bookmark>,
}

impl BookmarkLedger {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rehydrate from a persisted listing. Later duplicates of a name win.
    pub fn from_bookmarks<I>(bookmarks: I) -> Self
    where
        I: IntoIterator<Item = Bookmark>,
    {
        let mut ledger = Self::new();
        for bookmark in bookmarks {
            ledger.remove_entry(&bookmark.name);
            ledger.entries.push(bookmark);
        }
        ledger
    }

    /// Add or overwrite `name`. Overwriting refreshes the creation time and
    /// moves the bookmark to the end of the listing.
    pub fn add(&mut self, name: impl Into<String>, token_index: usize, now_ms: u64) {
        let name = name.into();
        self.remove_entry(&name);
        self.entries.push(Bookmark {
            name,
            token_index,
            created_at_ms: now_ms,
        });
    }

    pub fn remove(&mut self, name: &str) -> Result<Bookmark> {
        self.remove_entry(name)
            .ok_or_else(|| EngineError::NotFound(name.into()))
    }

    pub fn get(&self, name: &str) -> Result<usize> {
        self.entries
            .iter()
            .find(|bookmark| bookmark.name == name)
            .map(|bookmark| bookmark.token_index)
            .ok_or_else(|| EngineError::NotFound(name.into()))
    }

    /// Bookmarks ordered by creation time, oldest first.
    pub fn list(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, name: &str) -> Option<Bookmark> {
        let position = self.entries.iter().position(|b| b.name == name)?;
        Some(self.entries.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_remove_round_trip() {
        let mut ledger = BookmarkLedger::new();
        ledger.add("chapter two", 120, 5);
        assert_eq!(ledger.get("chapter two"), Ok(120));

        let removed = ledger.remove("chapter two").unwrap();
        assert_eq!(removed.token_index, 120);
        assert_eq!(
            ledger.get("chapter two"),
            Err(EngineError::NotFound("chapter two".into()))
        );
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut ledger = BookmarkLedger::new();
        assert!(matches!(ledger.remove("nope"), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn duplicate_add_overwrites_and_moves_to_end() {
        let mut ledger = BookmarkLedger::new();
        ledger.add("a", 1, 10);
        ledger.add("b", 2, 20);
        ledger.add("a", 7, 30);

        assert_eq!(ledger.len(), 2);
        let names: Vec<&str> = ledger.list().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(ledger.get("a"), Ok(7));
        assert_eq!(ledger.list()[1].created_at_ms, 30);
    }

    #[test]
    fn rehydrate_keeps_listing_order() {
        let saved = vec![
            Bookmark {
                name: "first".into(),
                token_index: 3,
                created_at_ms: 1,
            },
            Bookmark {
                name: "second".into(),
                token_index: 9,
                created_at_ms: 2,
            },
        ];
        let ledger = BookmarkLedger::from_bookmarks(saved.clone());
        assert_eq!(ledger.list(), saved.as_slice());
    }
}
