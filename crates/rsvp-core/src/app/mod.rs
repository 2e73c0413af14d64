//! Presentation state machine: position, transport state, speed, and the
//! single pending tick that advances through a loaded document.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::{
    bookmarks::BookmarkLedger,
    content::{Token, TokenSequence, tokenize},
    error::{EngineError, Result},
    focus::{compute_orp_index, split_at_orp},
    input::{CommandSource, SkipDirection, TransportCommand},
    pacing::{MAX_WPM, MIN_WPM, PacingConfig, WPM_STEP, duration_unchecked, validate_wpm},
    render::Frame,
};

/// Words moved by the plain skip forward / backward commands.
pub const DEFAULT_SKIP_WORDS: i64 = 10;
/// Undrained notifications kept before the oldest are dropped.
pub const MAX_QUEUED_EVENTS: usize = 256;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The one outstanding scheduled advance.
///
/// Deadlines are fractional milliseconds on the caller's clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTick {
    pub token_index: usize,
    pub scheduled_at_ms: f64,
    pub due_ms: f64,
}

impl PendingTick {
    pub fn remaining_ms(&self, now_ms: u64) -> f64 {
        (self.due_ms - now_ms as f64).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    /// Nothing was due.
    Idle,
    /// Moved to the next token.
    Advanced,
    /// Ran past the last token and stopped.
    Finished,
}

/// Notifications for renderers, drained with [`Presenter::drain_events`].
///
/// Draining is optional: renderers that only poll the queries can ignore
/// them, and at most [`MAX_QUEUED_EVENTS`] are kept.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
    TokenChanged { index: Option<usize> },
    StateChanged(PlaybackState),
    SpeedChanged { wpm: f64 },
    Finished,
    CommandRejected {
        command: &'static str,
        error: EngineError,
    },
}

pub struct Presenter {
    tokens: TokenSequence,
    config: PacingConfig,
    state: PlaybackState,
    position: Option<usize>,
    pending: Option<PendingTick>,
    events: VecDeque<PresentationEvent>,
}

include!("transport.rs");
include!("runtime.rs");
include!("view.rs");
