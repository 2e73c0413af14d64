//! Terminal front end for the RSVP presentation engine.
//!
//! Reads a document from a file or stdin, restores pacing and bookmarks from
//! the settings file, and flashes the words in place on the terminal.

use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{LevelFilter, debug, info, warn};
use rsvp_core::{
    app::{PlaybackState, PresentationEvent, Presenter, TickResult},
    input::NoCommands,
    pacing::PacingConfig,
    settings::{PersistedSettings, SettingsStore},
    text_policy::bookmark_label,
};

use json_store::JsonSettingsStore;
use loading::Document;
use settings_sync::SettingsSyncState;
use terminal::TerminalRenderer;

#[path = "main/json_store.rs"]
mod json_store;
#[path = "main/loading.rs"]
mod loading;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/terminal.rs"]
mod terminal;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
/// Longest sleep between polls, so a stalled clock still gets noticed.
const MAX_POLL_SLEEP_MS: u64 = 250;

#[derive(Debug, Parser)]
#[command(name = "rsvp", version, about = "Read text one word at a time")]
struct Args {
    /// Text file to read; stdin when omitted.
    path: Option<PathBuf>,

    /// Base reading speed in words per minute.
    #[arg(long, env = "RSVP_WPM")]
    wpm: Option<f64>,

    /// Display time multiplier for sentence-ending words.
    #[arg(long)]
    sentence_pause: Option<f64>,

    /// Display time multiplier for clause-ending words.
    #[arg(long)]
    clause_pause: Option<f64>,

    /// Extra time for words longer than six characters.
    #[arg(long)]
    length_factor: Option<f64>,

    /// Start at a saved bookmark.
    #[arg(long, conflicts_with = "start_at")]
    bookmark: Option<String>,

    /// Start at a word index.
    #[arg(long)]
    start_at: Option<usize>,

    /// Pause after showing this many words.
    #[arg(long)]
    words: Option<usize>,

    /// Save a bookmark where reading stops.
    #[arg(long)]
    save_bookmark: Option<String>,

    /// List bookmarks for the document and exit.
    #[arg(long)]
    list_bookmarks: bool,

    /// Do not read or write the settings file.
    #[arg(long)]
    no_save: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn pacing(&self, stored: PacingConfig) -> PacingConfig {
        PacingConfig {
            base_wpm: self.wpm.unwrap_or(stored.base_wpm),
            sentence_pause_multiplier: self
                .sentence_pause
                .unwrap_or(stored.sentence_pause_multiplier),
            clause_pause_multiplier: self.clause_pause.unwrap_or(stored.clause_pause_multiplier),
            length_adjustment_factor: self.length_factor.unwrap_or(stored.length_adjustment_factor),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let mut store = if args.no_save {
        None
    } else {
        Some(JsonSettingsStore::at_default_path()?)
    };
    if let Some(store) = store.as_ref() {
        debug!("settings file {}", store.path().display());
    }
    let mut settings = load_settings(store.as_mut());

    let document = loading::read_document(args.path.as_deref())?;
    info!("loaded {} ({} bytes)", document.key, document.text.len());

    let mut presenter =
        Presenter::new(args.pacing(settings.pacing)).context("invalid pacing settings")?;
    presenter.load_text(&document.text)?;
    if presenter.token_count() == 0 {
        warn!("{} contains no words", document.key);
        return Ok(());
    }

    let mut ledger = settings.ledger_for(&document.key);
    if args.list_bookmarks {
        for bookmark in ledger.list() {
            println!("{}", bookmark_label(bookmark, presenter.tokens()));
        }
        return Ok(());
    }

    let clock = Instant::now();
    if let Some(name) = args.bookmark.as_deref() {
        presenter
            .seek_to_bookmark(&ledger, name, elapsed_ms(&clock))
            .with_context(|| format!("cannot start at bookmark {name:?}"))?;
    } else if let Some(index) = args.start_at {
        presenter.seek_to(index, elapsed_ms(&clock))?;
    } else if let Some(index) = settings.resume_index_for(&document.key) {
        debug!("resuming {} at word {}", document.key, index);
        presenter.seek_to(index, elapsed_ms(&clock))?;
    }

    settings.pacing = *presenter.config();
    if document.is_file {
        settings.add_recent_document(&document.key);
    }
    let mut sync = SettingsSyncState::new(settings.clone(), SETTINGS_SAVE_DEBOUNCE_MS);

    let mut renderer = TerminalRenderer::stdout();
    let mut session = Session {
        presenter: &mut presenter,
        renderer: &mut renderer,
        sync: &mut sync,
        settings: &mut settings,
        document: &document,
        clock: &clock,
    };
    let shown = session.run(args.words, &mut store)?;
    renderer.finish(&presenter.frame())?;
    info!("showed {} words", shown);

    if let Some(name) = args.save_bookmark.as_deref()
        && let Some(index) = presenter.position()
    {
        ledger.add(name, index, unix_time_ms());
        settings.store_ledger(&document.key, &ledger);
        if let Some(saved) = ledger.list().last() {
            println!("bookmark {}", bookmark_label(saved, presenter.tokens()));
        }
    }

    record_resume(&mut settings, &presenter, &document);
    sync.track_current(settings, u64::MAX);
    sync.flush_now(store.as_mut());
    if sync.is_dirty() {
        warn!("settings were not saved");
    }
    Ok(())
}

struct Session<'a> {
    presenter: &'a mut Presenter,
    renderer: &'a mut TerminalRenderer<std::io::Stdout>,
    sync: &'a mut SettingsSyncState,
    settings: &'a mut PersistedSettings,
    document: &'a Document,
    clock: &'a Instant,
}

impl Session<'_> {
    /// Play until the document ends or `limit` words have been shown.
    fn run(
        &mut self,
        limit: Option<usize>,
        store: &mut Option<JsonSettingsStore>,
    ) -> Result<usize> {
        let mut commands = NoCommands::new();
        self.presenter.play(elapsed_ms(self.clock))?;
        self.renderer.draw(&self.presenter.frame())?;
        let mut shown = 1usize;

        loop {
            let now = elapsed_ms(self.clock);
            let Ok(result) = self.presenter.run_once(&mut commands, now);

            for event in self.presenter.drain_events() {
                if let PresentationEvent::CommandRejected { command, error } = event {
                    warn!("{command} rejected: {error}");
                }
            }

            match result {
                TickResult::Advanced => {
                    shown += 1;
                    self.renderer.draw(&self.presenter.frame())?;
                }
                TickResult::Finished => break,
                TickResult::Idle => {}
            }

            if limit.is_some_and(|limit| shown >= limit) {
                self.presenter.pause()?;
                break;
            }

            record_resume(self.settings, self.presenter, self.document);
            self.sync.track_current(self.settings.clone(), now);
            self.sync.flush_if_due(store.as_mut(), now);

            let wake = self
                .presenter
                .next_deadline_ms()
                .unwrap_or(now + MAX_POLL_SLEEP_MS);
            let sleep_ms = wake.saturating_sub(now).min(MAX_POLL_SLEEP_MS);
            if sleep_ms > 0 {
                thread::sleep(Duration::from_millis(sleep_ms));
            }
        }

        Ok(shown)
    }
}

fn load_settings(store: Option<&mut JsonSettingsStore>) -> PersistedSettings {
    let Some(store) = store else {
        return PersistedSettings::default();
    };

    match store.load() {
        Ok(Some(settings)) => settings,
        Ok(None) => PersistedSettings::default(),
        Err(err) => {
            warn!("ignoring unreadable settings: {err:#}");
            PersistedSettings::default()
        }
    }
}

/// Where to pick up next time. A finished document has nothing to resume;
/// stdin has no stable key, so it never touches the saved point.
fn record_resume(settings: &mut PersistedSettings, presenter: &Presenter, document: &Document) {
    if !document.is_file {
        return;
    }
    let index = presenter
        .position()
        .filter(|_| presenter.current_state() != PlaybackState::Stopped);
    settings.set_resume(&document.key, index);
}

fn elapsed_ms(clock: &Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

fn unix_time_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(key: &str, is_file: bool) -> Document {
        Document {
            key: key.into(),
            text: "one two three. four five.".into(),
            is_file,
        }
    }

    fn presenter_for(document: &Document) -> Presenter {
        let mut presenter = Presenter::new(PacingConfig::default()).unwrap();
        presenter.load_text(&document.text).unwrap();
        presenter
    }

    fn saved_at(key: &str, index: usize) -> PersistedSettings {
        let mut settings = PersistedSettings::default();
        settings.set_resume(key, Some(index));
        settings
    }

    #[test]
    fn stdin_session_keeps_the_saved_resume_point() {
        let stdin = document("<stdin>", false);
        let mut presenter = presenter_for(&stdin);
        let mut settings = saved_at("/books/a.txt", 40);

        presenter.play(0).unwrap();
        presenter.pause().unwrap();
        record_resume(&mut settings, &presenter, &stdin);
        assert_eq!(settings.resume_index_for("/books/a.txt"), Some(40));

        presenter.stop();
        record_resume(&mut settings, &presenter, &stdin);
        assert_eq!(settings.resume_index_for("/books/a.txt"), Some(40));
    }

    #[test]
    fn finishing_a_file_only_forgets_its_own_resume_point() {
        let other = document("/books/b.txt", true);
        let mut presenter = presenter_for(&other);
        let mut settings = saved_at("/books/a.txt", 40);

        record_resume(&mut settings, &presenter, &other);
        assert_eq!(settings.resume_index_for("/books/a.txt"), Some(40));

        presenter.play(0).unwrap();
        presenter.skip_words(2, 0).unwrap();
        presenter.pause().unwrap();
        record_resume(&mut settings, &presenter, &other);
        assert_eq!(settings.resume_index_for("/books/b.txt"), Some(2));

        presenter.stop();
        record_resume(&mut settings, &presenter, &other);
        assert!(settings.resume.is_none());
    }
}
