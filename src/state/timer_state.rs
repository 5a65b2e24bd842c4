//! Live countdown state and its derived values

use serde::{Deserialize, Serialize};

/// State of the current run.
///
/// `remaining_seconds` never exceeds `total_seconds`, and `is_running` and
/// `is_finished` are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub is_finished: bool,
}

impl TimerState {
    /// Create the idle state: nothing configured, nothing running
    pub fn idle() -> Self {
        Self::default()
    }

    /// Create a freshly started run of `total_seconds`
    pub fn running(total_seconds: u64) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            is_running: true,
            is_finished: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::idle()
    }

    /// Fraction of the run already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        (elapsed as f64 / self.total_seconds as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as `HH:MM:SS`
    pub fn formatted_remaining(&self) -> String {
        format_hms(self.remaining_seconds)
    }
}

/// Format a number of seconds as zero-padded `HH:MM:SS`
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
