//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod ticker;
pub mod completion;

// Re-export main functions
pub use ticker::tick_task;
pub use completion::completion_task;
