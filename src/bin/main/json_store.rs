use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Error, Result};
use log::debug;
use rsvp_core::settings::{PersistedSettings, SettingsStore};

const APP_DIR: &str = "rsvp";
const SETTINGS_FILE: &str = "settings.json";

/// Settings persisted as pretty-printed JSON.
#[derive(Clone, Debug)]
pub(super) struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform config dir>/rsvp/settings.json`.
    pub(super) fn at_default_path() -> Result<Self> {
        let base = dirs::config_dir().context("no configuration directory on this platform")?;
        Ok(Self::new(base.join(APP_DIR).join(SETTINGS_FILE)))
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("corrupt settings file {}", self.path.display()))?;
        debug!("settings: loaded {}", self.path.display());
        Ok(Some(settings))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)
            .with_context(|| format!("failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        debug!("settings: saved {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rsvp_core::{bookmarks::BookmarkLedger, pacing::PacingConfig};

    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSettingsStore::new(dir.path().join("settings.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSettingsStore::new(dir.path().join("nested").join("settings.json"));

        let mut settings = PersistedSettings::new(PacingConfig::default().with_wpm(420.0));
        let mut ledger = BookmarkLedger::new();
        ledger.add("midpoint", 250, 1_000);
        settings.store_ledger("book.txt", &ledger);
        settings.add_recent_document("book.txt");

        store.save(&settings).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonSettingsStore::new(path);
        assert!(store.load().is_err());
    }
}
