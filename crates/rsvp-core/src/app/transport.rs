impl Presenter {
    pub fn new(config: PacingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tokens: TokenSequence::empty(),
            config,
            state: PlaybackState::Stopped,
            position: None,
            pending: None,
            events: VecDeque::new(),
        })
    }

    /// Replace the document. Only valid while stopped.
    pub fn load(&mut self, tokens: TokenSequence) -> Result<()> {
        self.require_state("load", &[PlaybackState::Stopped])?;

        self.pending = None;
        self.position = if tokens.is_empty() { None } else { Some(0) };
        self.tokens = tokens;
        debug!("presenter: loaded tokens={}", self.tokens.len());
        self.push_token_changed();
        Ok(())
    }

    pub fn load_text(&mut self, raw_text: &str) -> Result<()> {
        self.require_state("load", &[PlaybackState::Stopped])?;
        self.load(tokenize(raw_text))
    }

    pub fn play(&mut self, now_ms: u64) -> Result<()> {
        self.require_state("play", &[PlaybackState::Stopped, PlaybackState::Paused])?;
        let position = self.require_position("play")?;

        self.state = PlaybackState::Playing;
        self.schedule_from(position, now_ms as f64);
        debug!("presenter: play position={} wpm={}", position, self.config.base_wpm);
        self.push_event(PresentationEvent::StateChanged(PlaybackState::Playing));
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.require_state("pause", &[PlaybackState::Playing])?;

        self.pending = None;
        self.state = PlaybackState::Paused;
        debug!("presenter: pause position={:?}", self.position);
        self.push_event(PresentationEvent::StateChanged(PlaybackState::Paused));
        Ok(())
    }

    pub fn toggle_play_pause(&mut self, now_ms: u64) -> Result<()> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Stopped | PlaybackState::Paused => self.play(now_ms),
        }
    }

    /// Stop from any state and rewind to the first token.
    pub fn stop(&mut self) {
        self.pending = None;
        let was = self.state;
        let rewound = self.rewound_position();
        self.state = PlaybackState::Stopped;

        debug!("presenter: stop from={:?}", was);
        if was != PlaybackState::Stopped {
            self.push_event(PresentationEvent::StateChanged(PlaybackState::Stopped));
        }
        if rewound != self.position {
            self.position = rewound;
            self.push_token_changed();
        }
    }

    pub fn skip_words(&mut self, delta: i64, now_ms: u64) -> Result<()> {
        self.require_state("skip_words", &[PlaybackState::Playing, PlaybackState::Paused])?;
        let position = self.require_position("skip_words")?;

        let distance = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        let target = if delta.is_negative() {
            position.saturating_sub(distance)
        } else {
            position.saturating_add(distance)
        };
        self.move_to(target, now_ms);
        Ok(())
    }

    pub fn skip_forward(&mut self, now_ms: u64) -> Result<()> {
        self.skip_words(DEFAULT_SKIP_WORDS, now_ms)
    }

    pub fn skip_backward(&mut self, now_ms: u64) -> Result<()> {
        self.skip_words(-DEFAULT_SKIP_WORDS, now_ms)
    }

    /// Jump to the nearest sentence-ending token strictly after (forward) or
    /// before (backward) the current one, or to the document edge if there is
    /// none.
    pub fn skip_sentence(&mut self, direction: SkipDirection, now_ms: u64) -> Result<()> {
        self.require_state(
            "skip_sentence",
            &[PlaybackState::Playing, PlaybackState::Paused],
        )?;
        let position = self.require_position("skip_sentence")?;
        let tokens = self.tokens.as_slice();

        let target = match direction {
            SkipDirection::Forward => tokens
                .iter()
                .skip(position + 1)
                .find(|token| token.ends_sentence)
                .map_or(tokens.len() - 1, |token| token.index),
            SkipDirection::Backward => tokens[..position]
                .iter()
                .rev()
                .find(|token| token.ends_sentence)
                .map_or(0, |token| token.index),
        };
        self.move_to(target, now_ms);
        Ok(())
    }

    /// Change the base rate. A pending tick keeps its progress: its remaining
    /// time is scaled by `old / new` instead of restarting.
    pub fn set_speed(&mut self, wpm: f64, now_ms: u64) -> Result<()> {
        validate_wpm(wpm)?;

        let old_wpm = self.config.base_wpm;
        self.config.base_wpm = wpm;
        self.rescale_pending(old_wpm / wpm, now_ms);
        debug!("presenter: speed {} -> {} wpm", old_wpm, wpm);
        self.push_event(PresentationEvent::SpeedChanged { wpm });
        Ok(())
    }

    pub fn speed_up(&mut self, now_ms: u64) -> Result<()> {
        let wpm = (self.config.base_wpm + WPM_STEP).min(MAX_WPM);
        self.set_speed(wpm, now_ms)
    }

    pub fn speed_down(&mut self, now_ms: u64) -> Result<()> {
        let wpm = (self.config.base_wpm - WPM_STEP).max(MIN_WPM);
        self.set_speed(wpm, now_ms)
    }

    /// Replace the whole pacing config. A pending tick is rescaled by how much
    /// the current token's duration changed.
    pub fn set_config(&mut self, config: PacingConfig, now_ms: u64) -> Result<()> {
        config.validate()?;

        let ratio = match self.current_token() {
            Some(token) => {
                duration_unchecked(token, &config) / duration_unchecked(token, &self.config)
            }
            None => 1.0,
        };
        let speed_changed = config.base_wpm != self.config.base_wpm;
        self.config = config;
        self.rescale_pending(ratio, now_ms);
        debug!("presenter: config replaced {:?}", self.config);
        if speed_changed {
            self.push_event(PresentationEvent::SpeedChanged {
                wpm: config.base_wpm,
            });
        }
        Ok(())
    }

    /// Move to `token_index`, clamped to the document. Valid in any state.
    pub fn seek_to(&mut self, token_index: usize, now_ms: u64) -> Result<()> {
        self.require_position("seek_to")?;
        self.move_to(token_index, now_ms);
        Ok(())
    }

    /// Seek to `floor(percent / 100 * N)`, clamped.
    pub fn seek_percent(&mut self, percent: f64, now_ms: u64) -> Result<()> {
        self.require_position("seek_percent")?;
        let fraction = (percent / 100.0).clamp(0.0, 1.0);
        let target = (fraction * self.tokens.len() as f64).floor() as usize;
        self.move_to(target, now_ms);
        Ok(())
    }

    pub fn seek_to_bookmark(
        &mut self,
        ledger: &BookmarkLedger,
        name: &str,
        now_ms: u64,
    ) -> Result<()> {
        let token_index = ledger.get(name)?;
        self.seek_to(token_index, now_ms)
    }

    /// Apply one transport command.
    pub fn apply(&mut self, command: TransportCommand, now_ms: u64) -> Result<()> {
        match command {
            TransportCommand::Play => self.play(now_ms),
            TransportCommand::Pause => self.pause(),
            TransportCommand::TogglePlayPause => self.toggle_play_pause(now_ms),
            TransportCommand::Stop => {
                self.stop();
                Ok(())
            }
            TransportCommand::SkipWords(delta) => self.skip_words(delta, now_ms),
            TransportCommand::SkipSentence(direction) => self.skip_sentence(direction, now_ms),
            TransportCommand::SetSpeed(wpm) => self.set_speed(wpm, now_ms),
            TransportCommand::SpeedUp => self.speed_up(now_ms),
            TransportCommand::SpeedDown => self.speed_down(now_ms),
            TransportCommand::SeekTo(index) => self.seek_to(index, now_ms),
            TransportCommand::SeekPercent(percent) => self.seek_percent(percent, now_ms),
        }
    }

    fn require_state(&self, command: &'static str, allowed: &[PlaybackState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                command,
                state: self.state,
            })
        }
    }

    fn require_position(&self, command: &'static str) -> Result<usize> {
        self.position.ok_or(EngineError::InvalidTransition {
            command,
            state: self.state,
        })
    }

    fn rewound_position(&self) -> Option<usize> {
        if self.tokens.is_empty() { None } else { Some(0) }
    }

    /// Clamp, move, and restart the pending tick when playing.
    fn move_to(&mut self, target: usize, now_ms: u64) {
        let Some(last) = self.tokens.last_index() else {
            return;
        };
        self.pending = None;
        let target = target.min(last);

        if self.position != Some(target) {
            self.position = Some(target);
            self.push_token_changed();
        }
        if self.state == PlaybackState::Playing {
            self.schedule_from(target, now_ms as f64);
        }
        debug!("presenter: moved to {}/{}", target, self.tokens.len());
    }

    fn rescale_pending(&mut self, ratio: f64, now_ms: u64) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let now = now_ms as f64;
        let remaining = pending.remaining_ms(now_ms) * ratio;
        self.pending = Some(PendingTick {
            token_index: pending.token_index,
            scheduled_at_ms: now,
            due_ms: now + remaining,
        });
    }

    fn push_token_changed(&mut self) {
        self.push_event(PresentationEvent::TokenChanged {
            index: self.position,
        });
    }

    /// Queue a notification, dropping the oldest once the queue is full so a
    /// renderer that only polls does not grow it without bound.
    fn push_event(&mut self, event: PresentationEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
