//! Lap Stopwatch - A single-page stopwatch with lap times, served over HTTP
//! 
//! This library provides the stopwatch state machine, the once-per-second
//! ticker that drives it, and the page and JSON API that present it.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Stopwatch, TimerStatus};
pub use api::create_router;
pub use utils::{formatted_seconds, signals::shutdown_signal};
