//! Game-specific error types.
//!
//! By design nothing in the gameplay path panics or surfaces errors to the
//! player: fallible setup (the audio output stream, config parsing) returns
//! through these types and is absorbed at the call site with a logged
//! warning, degrading to a silent or default-configured game.

use std::fmt;

/// Top-level error enum for the rollaball game.
#[derive(Debug)]
pub enum GameError {
    /// The host has no default audio output device.
    /// The game runs silent; this is never fatal.
    NoOutputDevice,

    /// The audio backend rejected a query or request during stream setup.
    AudioBackend {
        /// Human-readable description of where the failure occurred.
        context: &'static str,
        /// The backend's own error text.
        reason: String,
    },

    /// The dedicated audio thread exited before reporting stream status,
    /// or could not be spawned at all.
    AudioWorkerDied,

    /// A tuning constant is outside its safe operating range.
    /// Returned by the validation helpers below.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoOutputDevice => {
                write!(f, "no default audio output device available")
            }
            GameError::AudioBackend { context, reason } => {
                write!(f, "audio backend failed during '{}': {}", context, reason)
            }
            GameError::AudioWorkerDied => {
                write!(f, "audio worker thread died before the stream came up")
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if the per-sample amplitude decay is outside (0, 1].
///
/// Zero or negative decay makes a triggered tone ring forever; above 1.0 the
/// first sample already decays to silence.
pub fn validate_decay_rate(value: f32) -> GameResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name: "amplitude_decay_per_sample",
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error if the impact activation threshold is negative.
///
/// A negative threshold would let resting contacts retrigger the tone every
/// physics step.
pub fn validate_impact_threshold(value: f32) -> GameResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name: "impact_speed_threshold",
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if the full-scale impact speed is not strictly positive.
pub fn validate_full_scale(value: f32) -> GameResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name: "impact_speed_full_scale",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}
