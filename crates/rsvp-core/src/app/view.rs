impl Presenter {
    pub fn current_token(&self) -> Option<&Token> {
        self.position.and_then(|index| self.tokens.get(index))
    }

    pub fn current_state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    pub fn wpm(&self) -> f64 {
        self.config.base_wpm
    }

    pub fn current_orp_index(&self) -> Option<usize> {
        self.current_token()
            .map(|token| compute_orp_index(&token.text))
    }

    /// `position / max(N - 1, 1)`, `0.0` for an empty document.
    pub fn progress_fraction(&self) -> f64 {
        let Some(position) = self.position else {
            return 0.0;
        };
        position as f64 / self.tokens.len().saturating_sub(1).max(1) as f64
    }

    pub fn words_remaining(&self) -> usize {
        self.position
            .map_or(0, |position| self.tokens.len().saturating_sub(position))
    }

    /// Sum of the display durations from the current token to the end at the
    /// current speed.
    pub fn estimated_time_remaining_ms(&self) -> f64 {
        let Some(position) = self.position else {
            return 0.0;
        };
        self.tokens
            .iter()
            .skip(position)
            .map(|token| duration_unchecked(token, &self.config))
            .sum()
    }

    pub fn pending_tick(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Earliest whole millisecond at which [`Presenter::tick`] will advance.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.pending.map(|pending| pending.due_ms.ceil() as u64)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Notifications queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = PresentationEvent> + '_ {
        self.events.drain(..)
    }

    /// Snapshot for the renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            word: self.current_token().map(|token| split_at_orp(&token.text)),
            token_index: self.position,
            token_count: self.tokens.len(),
            state: self.state,
            wpm: self.config.base_wpm,
            progress: self.progress_fraction(),
            remaining_ms: self.estimated_time_remaining_ms(),
        }
    }
}
