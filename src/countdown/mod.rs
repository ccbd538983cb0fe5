//! Countdown core
//!
//! The controller state machine and the time formatting used by every front end.

pub mod controller;
pub mod format;

// Re-export main types
pub use controller::{CountdownController, CountdownEvent, CountdownSnapshot, RunState};
pub use format::{time_to_string, ClockFace};

/// Total countdown length in milliseconds
pub const COUNTDOWN_DURATION_MS: u64 = 60 * 1000;

/// Interval between ticks in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;
