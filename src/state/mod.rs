//! State management module
//!
//! This module contains the countdown engine, its value types and the
//! controller that shares it with the rest of the application.

pub mod duration;
pub mod timer_state;
pub mod engine;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use duration::TimerDuration;
pub use timer_state::{format_hms, TimerState};
pub use engine::{TimerEngine, TimerEvent, TimerPhase};
pub use snapshot::{TimerAction, TimerSnapshot};
pub use app_state::AppState;
