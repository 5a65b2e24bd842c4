//! External collaborator integrations
//!
//! This module contains the notification side of the timer: the intents the
//! engine raises and the scheduler that fulfils them.

pub mod notification;

// Re-export main types
pub use notification::*;
