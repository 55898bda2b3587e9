use thiserror::Error;

use crate::models::IntervalKind;

/// Custom error types for tomatick
#[derive(Debug, Error)]
pub enum TomatickError {
    #[error("{kind} duration must be between 1 and {max} minutes, got {minutes}")]
    InvalidDuration {
        kind: IntervalKind,
        minutes: u32,
        max: u32,
    },

    #[error("Popup timeout must be between 1 and {max} seconds, got {seconds}")]
    InvalidTimeout { seconds: u64, max: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
