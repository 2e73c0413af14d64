use std::io::{self, Stdout, Write};

use rsvp_core::{app::PlaybackState, render::Frame};

/// Column the ORP character is pinned to, so the eye never moves.
const ORP_COLUMN: usize = 16;
const FOCUS_ON: &str = "\x1b[1;31m";
const FOCUS_OFF: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Redraws one terminal line per frame.
pub(super) struct TerminalRenderer<W: Write> {
    out: W,
    color: bool,
}

impl TerminalRenderer<Stdout> {
    pub(super) fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub(super) fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub(super) fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let line = self.format_line(frame);
        write!(self.out, "{CLEAR_LINE}{line}")?;
        self.out.flush()
    }

    /// Leave the last frame on screen and move to a fresh line.
    pub(super) fn finish(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.draw(frame)?;
        writeln!(self.out)
    }

    fn format_line(&self, frame: &Frame<'_>) -> String {
        let mut line = String::new();

        if let Some(word) = frame.word {
            let pad = ORP_COLUMN.saturating_sub(word.before.chars().count());
            line.extend(core::iter::repeat_n(' ', pad));
            line.push_str(word.before);
            if self.color {
                line.push_str(FOCUS_ON);
                line.push_str(word.focus);
                line.push_str(FOCUS_OFF);
            } else {
                line.push_str(word.focus);
            }
            line.push_str(word.after);
        }

        let status = match frame.state {
            PlaybackState::Playing => "",
            PlaybackState::Paused => " [paused]",
            PlaybackState::Stopped => " [stopped]",
        };
        line.push_str(&format!(
            "    {} {}% {} wpm -{}{}",
            frame.position_label(),
            frame.progress_percent(),
            frame.wpm.round(),
            frame.remaining_label(),
            status
        ));
        line
    }
}
