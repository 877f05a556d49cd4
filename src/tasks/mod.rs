//! Background tasks module
//! 
//! This module contains the tick scheduler and other tasks that run
//! alongside the HTTP server.

pub mod ticker;
pub mod activity_log;

// Re-export main items
pub use ticker::{Ticker, TICK_PERIOD};
pub use activity_log::activity_log_task;
