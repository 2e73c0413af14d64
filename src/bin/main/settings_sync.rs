use log::warn;
use rsvp_core::settings::{PersistedSettings, SettingsStore};

use super::json_store::JsonSettingsStore;

/// Debounces settings writes so per-word resume updates do not hit the disk
/// on every tick.
pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
    debounce_ms: u64,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings, debounce_ms: u64) -> Self {
        Self {
            last_saved: initial,
            pending: None,
            debounce_ms,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    pub(super) fn flush_if_due(&mut self, store: Option<&mut JsonSettingsStore>, now_ms: u64) {
        let Some((_, changed_at_ms)) = self.pending.as_ref() else {
            return;
        };

        if now_ms.saturating_sub(*changed_at_ms) < self.debounce_ms {
            return;
        }

        self.flush(store, now_ms);
    }

    pub(super) fn flush_now(&mut self, store: Option<&mut JsonSettingsStore>) {
        self.flush(store, u64::MAX);
    }

    fn flush(&mut self, store: Option<&mut JsonSettingsStore>, now_ms: u64) {
        let Some((candidate, _)) = self.pending.take() else {
            return;
        };

        match store {
            Some(store) => match store.save(&candidate) {
                Ok(()) => self.last_saved = candidate,
                Err(err) => {
                    warn!("settings: save failed, will retry: {err:#}");
                    self.pending = Some((candidate, now_ms));
                }
            },
            None => self.last_saved = candidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use rsvp_core::pacing::PacingConfig;

    use super::*;

    fn faster(settings: &PersistedSettings, wpm: f64) -> PersistedSettings {
        let mut next = settings.clone();
        next.pacing = next.pacing.with_wpm(wpm);
        next
    }

    #[test]
    fn waits_for_debounce_before_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSettingsStore::new(dir.path().join("settings.json"));
        let initial = PersistedSettings::new(PacingConfig::default());
        let mut sync = SettingsSyncState::new(initial.clone(), 1_000);

        sync.track_current(faster(&initial, 400.0), 100);
        sync.flush_if_due(Some(&mut store), 900);
        assert!(sync.is_dirty());
        assert!(store.load().unwrap().is_none());

        sync.flush_if_due(Some(&mut store), 1_100);
        assert!(!sync.is_dirty());
        assert_eq!(store.load().unwrap().unwrap().pacing.base_wpm, 400.0);
    }

    #[test]
    fn new_changes_restart_the_debounce() {
        let initial = PersistedSettings::default();
        let mut sync = SettingsSyncState::new(initial.clone(), 1_000);

        sync.track_current(faster(&initial, 400.0), 0);
        sync.track_current(faster(&initial, 450.0), 800);
        sync.flush_if_due(None, 1_500);
        assert!(sync.is_dirty());
        sync.flush_if_due(None, 1_800);
        assert!(!sync.is_dirty());
    }

    #[test]
    fn reverting_to_saved_clears_pending() {
        let initial = PersistedSettings::default();
        let mut sync = SettingsSyncState::new(initial.clone(), 1_000);

        sync.track_current(faster(&initial, 400.0), 0);
        sync.track_current(initial, 10);
        assert!(!sync.is_dirty());
    }
}
