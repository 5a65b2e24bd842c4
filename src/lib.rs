//! Pomodoro Timer - A countdown timer engine with a local control surface
//!
//! This library provides the countdown state machine, the controller that
//! publishes its state to observers, and the background tasks and HTTP
//! endpoints that drive it.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerEngine, TimerEvent, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
