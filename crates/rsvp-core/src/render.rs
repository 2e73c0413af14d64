//! View model consumed by whatever draws the words.

use crate::{app::PlaybackState, focus::FocusSplit, text_policy::duration_label};

/// Everything a renderer needs for one redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'a> {
    /// Current word cut around its ORP, `None` when nothing is loaded.
    pub word: Option<FocusSplit<'a>>,
    pub token_index: Option<usize>,
    pub token_count: usize,
    pub state: PlaybackState,
    pub wpm: f64,
    /// 0.0..=1.0
    pub progress: f64,
    pub remaining_ms: f64,
}

impl Frame<'_> {
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// `"<index+1>/<count>"`, or `"0/0"` for an empty document.
    pub fn position_label(&self) -> String {
        match self.token_index {
            Some(index) => format!("{}/{}", index + 1, self.token_count),
            None => "0/0".into(),
        }
    }

    pub fn remaining_label(&self) -> String {
        duration_label(self.remaining_ms)
    }

    pub fn progress_percent(&self) -> u8 {
        (self.progress * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_empty_frame() {
        let frame = Frame {
            word: None,
            token_index: None,
            token_count: 0,
            state: PlaybackState::Stopped,
            wpm: 300.0,
            progress: 0.0,
            remaining_ms: 0.0,
        };
        assert_eq!(frame.position_label(), "0/0");
        assert_eq!(frame.remaining_label(), "0:00");
        assert_eq!(frame.progress_percent(), 0);
        assert!(!frame.is_paused());
    }
}
