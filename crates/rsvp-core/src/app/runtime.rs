impl Presenter {
    /// Fire the pending tick if it is due at `now_ms`.
    ///
    /// At most one token is advanced per call. The following deadline is
    /// chained from the fired deadline rather than from `now_ms`, so polling
    /// late does not shift the rest of the document.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.state != PlaybackState::Playing {
            return TickResult::Idle;
        }
        let Some(pending) = self.pending else {
            return TickResult::Idle;
        };
        if (now_ms as f64) < pending.due_ms {
            return TickResult::Idle;
        }
        self.pending = None;

        // Never advance from a tick scheduled for another position. Restart
        // the deadline for the word actually shown so playback keeps going.
        if self.position != Some(pending.token_index) {
            trace!(
                "presenter: dropped stale tick for {} at {:?}",
                pending.token_index, self.position
            );
            match self.position {
                Some(index) if index < self.tokens.len() => {
                    self.schedule_from(index, now_ms as f64);
                }
                _ => self.finish(),
            }
            return TickResult::Idle;
        }

        let next = pending.token_index + 1;
        if next >= self.tokens.len() {
            self.finish();
            return TickResult::Finished;
        }

        self.position = Some(next);
        self.push_token_changed();

        let chained = pending.due_ms + duration_unchecked(&self.tokens[next], &self.config);
        // Fell behind by more than a whole word: restart the chain from now
        // instead of bursting through the backlog.
        let start = if chained <= now_ms as f64 {
            now_ms as f64
        } else {
            pending.due_ms
        };
        self.schedule_from(next, start);
        trace!("presenter: tick -> {}/{}", next, self.tokens.len());
        TickResult::Advanced
    }

    /// Drain `source` and apply every command in order. Rejected commands are
    /// reported as [`PresentationEvent::CommandRejected`] and leave the state
    /// untouched.
    pub fn process_commands<S>(
        &mut self,
        source: &mut S,
        now_ms: u64,
    ) -> core::result::Result<usize, S::Error>
    where
        S: CommandSource,
    {
        let mut applied = 0usize;
        while let Some(command) = source.poll_command()? {
            match self.apply(command, now_ms) {
                Ok(()) => applied += 1,
                Err(error) => {
                    debug!("presenter: rejected {}: {}", command.name(), error);
                    self.push_event(PresentationEvent::CommandRejected {
                        command: command.name(),
                        error,
                    });
                }
            }
        }
        Ok(applied)
    }

    /// One driver iteration: queued commands first, then the tick.
    pub fn run_once<S>(
        &mut self,
        source: &mut S,
        now_ms: u64,
    ) -> core::result::Result<TickResult, S::Error>
    where
        S: CommandSource,
    {
        self.process_commands(source, now_ms)?;
        Ok(self.tick(now_ms))
    }

    fn schedule_from(&mut self, token_index: usize, start_ms: f64) {
        let duration = duration_unchecked(&self.tokens[token_index], &self.config);
        self.pending = Some(PendingTick {
            token_index,
            scheduled_at_ms: start_ms,
            due_ms: start_ms + duration,
        });
    }

    fn finish(&mut self) {
        debug!("presenter: end of document tokens={}", self.tokens.len());
        self.pending = None;
        self.state = PlaybackState::Stopped;
        self.position = self.rewound_position();
        self.push_event(PresentationEvent::Finished);
        self.push_event(PresentationEvent::StateChanged(PlaybackState::Stopped));
        self.push_token_changed();
    }
}
