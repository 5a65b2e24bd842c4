//! Countdown engine.
//!
//! The engine is a plain state machine with no internal threads and no clock.
//! The owner calls `tick()` once per elapsed second while the timer runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> configure -> Configured -> start -> Running -> tick... -> Finished
//!   ^                                           |                     |
//!   +------------------- stop ------------------+---------------------+
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TimerDuration, TimerState};
use crate::error::TimerError;

/// Coarse lifecycle position, as shown to presentation layers.
///
/// The phase combines the run with the pending duration: after `stop()` the
/// run is idle, but the phase reads `Configured` while a non-zero pending
/// duration is kept for the next start. `Idle` means nothing is running and
/// nothing is ready to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Configured,
    Running,
    Finished,
}

/// Outcome of an accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimerEvent {
    Configured { total_seconds: u64 },
    Started { total_seconds: u64 },
    Ticked { remaining_seconds: u64 },
    Finished { total_seconds: u64 },
    Stopped,
}

/// Owns the pending duration and the live [`TimerState`].
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    pending: TimerDuration,
    state: TimerState,
    /// Incremented by every accepted `start()`
    run_id: u64,
}

impl TimerEngine {
    /// Create an idle engine with nothing configured
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn pending(&self) -> TimerDuration {
        self.pending
    }

    /// Whether the pending duration may be confirmed and started
    pub fn can_confirm(&self) -> bool {
        !self.pending.is_zero()
    }

    /// Identifier of the most recent run, `0` before the first start
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    pub fn formatted_remaining(&self) -> String {
        self.state.formatted_remaining()
    }

    pub fn phase(&self) -> TimerPhase {
        if self.state.is_running {
            TimerPhase::Running
        } else if self.state.is_finished {
            TimerPhase::Finished
        } else if self.can_confirm() {
            TimerPhase::Configured
        } else {
            TimerPhase::Idle
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the duration used by the next `start()`.
    ///
    /// Fields are clamped to their ranges. A zero total, or any call while a
    /// run is in progress, is refused and the previous pending duration is kept.
    pub fn configure(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<TimerEvent, TimerError> {
        if self.state.is_running {
            return Err(TimerError::AlreadyRunning);
        }
        let duration = TimerDuration::new(hours, minutes, seconds);
        if duration.is_zero() {
            return Err(TimerError::ZeroDuration);
        }
        self.pending = duration;
        Ok(TimerEvent::Configured {
            total_seconds: duration.total_seconds(),
        })
    }

    /// Forget the pending duration. Refused while a run is in progress.
    pub fn clear_pending(&mut self) -> Result<(), TimerError> {
        if self.state.is_running {
            return Err(TimerError::AlreadyRunning);
        }
        self.pending = TimerDuration::zero();
        Ok(())
    }

    /// Begin a run of the pending duration.
    ///
    /// Allowed from idle, configured and finished; refused while running.
    pub fn start(&mut self) -> Result<TimerEvent, TimerError> {
        if self.state.is_running {
            return Err(TimerError::AlreadyRunning);
        }
        let total_seconds = self.pending.total_seconds();
        if total_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.state = TimerState::running(total_seconds);
        self.run_id += 1;
        Ok(TimerEvent::Started { total_seconds })
    }

    /// Count down one second. Returns `None` when no run is in progress.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.state.is_running {
            debug!("Ignoring tick while timer is not running");
            return None;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.state.is_running = false;
            self.state.is_finished = true;
            return Some(TimerEvent::Finished {
                total_seconds: self.state.total_seconds,
            });
        }

        Some(TimerEvent::Ticked {
            remaining_seconds: self.state.remaining_seconds,
        })
    }

    /// Reset to idle. Returns `None` when there was nothing to stop.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if self.state.is_idle() {
            return None;
        }
        self.state = TimerState::idle();
        Some(TimerEvent::Stopped)
    }
}
