//! Transport command abstraction layer.
//!
//! UI code maps its shortcuts and buttons to [`TransportCommand`]s and hands
//! them to the presenter through a [`CommandSource`]. Commands are applied in
//! the order they are polled.

mod mock;

pub use mock::{NoCommands, ScriptedCommands};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Logical actions consumed by the presenter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    Play,
    Pause,
    TogglePlayPause,
    Stop,
    SkipWords(i64),
    SkipSentence(SkipDirection),
    SetSpeed(f64),
    SpeedUp,
    SpeedDown,
    SeekTo(usize),
    SeekPercent(f64),
}

impl TransportCommand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::TogglePlayPause => "toggle_play_pause",
            Self::Stop => "stop",
            Self::SkipWords(_) => "skip_words",
            Self::SkipSentence(_) => "skip_sentence",
            Self::SetSpeed(_) => "set_speed",
            Self::SpeedUp => "speed_up",
            Self::SpeedDown => "speed_down",
            Self::SeekTo(_) => "seek_to",
            Self::SeekPercent(_) => "seek_percent",
        }
    }
}

/// Polled command provider.
pub trait CommandSource {
    type Error;

    fn poll_command(&mut self) -> Result<Option<TransportCommand>, Self::Error>;
}
