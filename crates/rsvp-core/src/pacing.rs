//! Per-token display durations.

use crate::{
    content::Token,
    error::{EngineError, Result},
};

pub const MIN_WPM: f64 = 50.0;
pub const MAX_WPM: f64 = 2000.0;
pub const DEFAULT_WPM: f64 = 300.0;
/// Step applied by speed-up / speed-down commands.
pub const WPM_STEP: f64 = 25.0;

/// Words longer than this many characters get the length adjustment.
const LENGTH_ADJUSTMENT_THRESHOLD: usize = 6;

/// Pacing parameters supplied by the caller's settings layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PacingConfig {
    pub base_wpm: f64,
    pub sentence_pause_multiplier: f64,
    pub clause_pause_multiplier: f64,
    pub length_adjustment_factor: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_wpm: DEFAULT_WPM,
            sentence_pause_multiplier: 2.5,
            clause_pause_multiplier: 1.5,
            length_adjustment_factor: 0.0,
        }
    }
}

impl PacingConfig {
    pub fn with_wpm(mut self, base_wpm: f64) -> Self {
        self.base_wpm = base_wpm;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_wpm(self.base_wpm)?;
        validate_multiplier("sentence_pause_multiplier", self.sentence_pause_multiplier)?;
        validate_multiplier("clause_pause_multiplier", self.clause_pause_multiplier)?;

        let factor = self.length_adjustment_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "length_adjustment_factor must be >= 0, got {factor}"
            )));
        }
        Ok(())
    }

    /// Milliseconds per word before any adjustment.
    pub fn base_duration_ms(&self) -> f64 {
        60_000.0 / self.base_wpm
    }
}

pub fn validate_wpm(wpm: f64) -> Result<()> {
    if wpm.is_finite() && (MIN_WPM..=MAX_WPM).contains(&wpm) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "base_wpm must be within {MIN_WPM}..={MAX_WPM}, got {wpm}"
        )))
    }
}

fn validate_multiplier(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{name} must be >= 1, got {value}"
        )))
    }
}

/// Display duration of `token` in milliseconds.
///
/// Always finite and positive for a config that passes [`PacingConfig::validate`].
/// There is no upper cap on the length adjustment.
pub fn compute_duration_ms(token: &Token, config: &PacingConfig) -> Result<f64> {
    config.validate()?;
    Ok(duration_unchecked(token, config))
}

/// Duration for a config the caller already validated.
pub(crate) fn duration_unchecked(token: &Token, config: &PacingConfig) -> f64 {
    let extra_chars = token
        .char_len()
        .saturating_sub(LENGTH_ADJUSTMENT_THRESHOLD) as f64;
    let length_scale = 1.0
        + config.length_adjustment_factor * extra_chars / LENGTH_ADJUSTMENT_THRESHOLD as f64;

    let boundary = if token.ends_sentence {
        config.sentence_pause_multiplier
    } else if token.ends_clause {
        config.clause_pause_multiplier
    } else {
        1.0
    };

    config.base_duration_ms() * length_scale * boundary
}
