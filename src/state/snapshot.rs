//! Read model handed to presentation collaborators

use serde::{Deserialize, Serialize};

use super::{TimerDuration, TimerEngine, TimerPhase};

/// What the action button should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    /// Open the "new timer" sheet
    NewTimer,
    /// Stop the current run
    Stop,
}

/// Everything a view needs to draw the timer, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    /// Changes whenever a new run starts
    pub run_id: u64,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub is_finished: bool,
    /// Ring fill, `0.0..=1.0`
    pub progress: f64,
    /// Knob rotation in degrees
    pub knob_degrees: f64,
    /// Digital display, `HH:MM:SS`
    pub display: String,
    pub pending: TimerDuration,
    pub can_confirm: bool,
    pub action: TimerAction,
}

impl TimerSnapshot {
    pub fn capture(engine: &TimerEngine) -> Self {
        let state = engine.state();
        let progress = state.progress();
        Self {
            phase: engine.phase(),
            run_id: engine.run_id(),
            total_seconds: state.total_seconds,
            remaining_seconds: state.remaining_seconds,
            is_running: state.is_running,
            is_finished: state.is_finished,
            progress,
            knob_degrees: progress * 360.0,
            display: state.formatted_remaining(),
            pending: engine.pending(),
            can_confirm: engine.can_confirm(),
            action: if state.is_running { TimerAction::Stop } else { TimerAction::NewTimer },
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::capture(&TimerEngine::new())
    }
}
