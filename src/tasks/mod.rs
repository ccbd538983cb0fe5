//! Background tasks module
//!
//! This module contains background tasks that run alongside the front ends.

pub mod countdown_ticker;
pub mod event_log;

// Re-export main functions
pub use countdown_ticker::countdown_ticker_task;
pub use event_log::event_log_task;
