//! State management module
//! 
//! This module contains the stopwatch state machine and the shared
//! application state that drives it.

pub mod stopwatch;
pub mod app_state;

// Re-export main types
pub use stopwatch::{Action, Stopwatch, TimerStatus, Transition};
pub use app_state::AppState;
