//! Persisted user settings abstraction.
//!
//! The engine never reads or writes these itself. A settings layer loads a
//! [`PersistedSettings`] at startup, hands the pacing config and bookmark
//! ledgers to the engine, and saves snapshots back through a
//! [`SettingsStore`].

use std::collections::BTreeMap;

use crate::{
    bookmarks::{Bookmark, BookmarkLedger},
    pacing::PacingConfig,
};

pub const MAX_RECENT_DOCUMENTS: usize = 10;

/// Reading location used to resume a document.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeState {
    pub document: String,
    pub token_index: usize,
}

/// User-tunable settings that should survive restarts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PersistedSettings {
    pub pacing: PacingConfig,
    /// Bookmarks per document key, each list in creation order.
    pub bookmarks: BTreeMap<String, Vec<Bookmark>>,
    pub resume: Option<ResumeState>,
    /// Most recent first, without duplicates.
    pub recent_documents: Vec<String>,
}

impl PersistedSettings {
    pub fn new(pacing: PacingConfig) -> Self {
        Self {
            pacing,
            ..Self::default()
        }
    }

    /// Record where `document` was left. `None` forgets the resume point, but
    /// only if it belongs to `document`; another document's point is kept.
    pub fn set_resume(&mut self, document: &str, token_index: Option<usize>) {
        match token_index {
            Some(token_index) => {
                self.resume = Some(ResumeState {
                    document: document.into(),
                    token_index,
                });
            }
            None => {
                if self.resume_index_for(document).is_some() {
                    self.resume = None;
                }
            }
        }
    }

    /// Move `document` to the front of the recent list.
    pub fn add_recent_document(&mut self, document: &str) {
        self.recent_documents.retain(|existing| existing != document);
        self.recent_documents.insert(0, document.into());
        self.recent_documents.truncate(MAX_RECENT_DOCUMENTS);
    }

    pub fn ledger_for(&self, document: &str) -> BookmarkLedger {
        self.bookmarks
            .get(document)
            .map(|saved| BookmarkLedger::from_bookmarks(saved.iter().cloned()))
            .unwrap_or_default()
    }

    /// Record `ledger` as the bookmarks of `document`. An empty ledger drops
    /// the entry.
    pub fn store_ledger(&mut self, document: &str, ledger: &BookmarkLedger) {
        if ledger.is_empty() {
            self.bookmarks.remove(document);
        } else {
            self.bookmarks.insert(document.into(), ledger.list().to_vec());
        }
    }

    /// Resume position for `document`, if the last session was reading it.
    pub fn resume_index_for(&self, document: &str) -> Option<usize> {
        self.resume
            .as_ref()
            .filter(|resume| resume.document == document)
            .map(|resume| resume.token_index)
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
