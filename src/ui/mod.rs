//! Terminal screen module
//!
//! Renders the countdown and maps key presses to controller actions.

pub mod screen;
pub mod view;

// Re-export main functions
pub use screen::{run, ScreenAction};
