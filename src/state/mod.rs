//! State management module
//!
//! Shared ownership of the countdown and its change notifications.

pub mod app_state;

// Re-export main types
pub use app_state::AppState;
