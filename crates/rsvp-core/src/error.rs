//! Error types for the presentation engine.

use thiserror::Error;

use crate::app::PlaybackState;

/// Recoverable engine errors.
///
/// A command that returns an error has not changed any engine state.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// Pacing parameters outside their allowed ranges.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Command not valid in the current playback state.
    #[error("{command} is not valid while {state:?}")]
    InvalidTransition {
        command: &'static str,
        state: PlaybackState,
    },

    /// Bookmark lookup miss.
    #[error("bookmark not found: {0}")]
    NotFound(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
