//! Process-level helpers shared by the front ends

pub mod signals;

pub use signals::shutdown_signal;
