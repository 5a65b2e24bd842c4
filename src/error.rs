//! Error types for the timer engine and its controller

use thiserror::Error;

/// Guarded conditions raised at the engine boundary.
///
/// None of these change timer state; callers are expected to prevent them by
/// disabling the matching controls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The configured duration adds up to zero seconds
    #[error("duration must be greater than zero seconds")]
    ZeroDuration,

    /// A run is already in progress and must be stopped first
    #[error("timer is already running")]
    AlreadyRunning,

    /// The shared engine lock was poisoned by a panicking holder
    #[error("failed to lock timer state: {0}")]
    StatePoisoned(String),
}

impl TimerError {
    /// Whether this error is a rejected command rather than an internal failure
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ZeroDuration | Self::AlreadyRunning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_distinguished_from_failures() {
        assert!(TimerError::ZeroDuration.is_rejection());
        assert!(TimerError::AlreadyRunning.is_rejection());
        assert!(!TimerError::StatePoisoned("boom".into()).is_rejection());
    }
}
