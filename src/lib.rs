//! Countdown Timer - a fixed one-minute countdown with play, pause and stop
//!
//! The countdown state machine lives in [`countdown`]; [`state::AppState`]
//! shares it between the ticker task, the terminal screen and the optional
//! HTTP control API, notifying each of them on every transition.

pub mod config;
pub mod countdown;
pub mod state;
pub mod api;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use countdown::{CountdownController, CountdownEvent, CountdownSnapshot, RunState};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
