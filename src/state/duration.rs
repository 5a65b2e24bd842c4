//! Configured countdown length

use serde::{Deserialize, Serialize};

/// Hours, minutes and seconds selected for the next run.
///
/// Every field is clamped to the range the duration picker offers, so a
/// `TimerDuration` is always well formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimerDuration {
    pub const MAX_HOURS: u32 = 12;
    pub const MAX_MINUTES: u32 = 59;
    pub const MAX_SECONDS: u32 = 59;

    /// Build a duration, clamping each field to its upper bound
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours: hours.min(Self::MAX_HOURS),
            minutes: minutes.min(Self::MAX_MINUTES),
            seconds: seconds.min(Self::MAX_SECONDS),
        }
    }

    /// The zero duration, used while nothing has been picked
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }
}
