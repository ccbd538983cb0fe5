//! Countdown state machine

use serde::{Deserialize, Serialize};

use super::{time_to_string, COUNTDOWN_DURATION_MS, TICK_INTERVAL_MS};

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

impl RunState {
    /// Check if ticks should currently be applied
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition produced by a controller operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CountdownEvent {
    Started,
    Resumed,
    Ticked { remaining_ms: u64 },
    Paused { remaining_ms: u64 },
    Stopped,
    Finished,
}

/// Point-in-time view of the countdown for observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub run_state: RunState,
    pub remaining_ms: u64,
    pub duration_ms: u64,
    /// Remaining time as `HH,MM,SS`
    pub display: String,
    /// Bumped on every start or resume
    pub run_id: u64,
}

/// Owns the countdown's duration, remaining time and run state.
///
/// Every operation is total: calls that are not valid from the current state
/// return `None` and leave the controller untouched. Ticks are only applied
/// while [`RunState::Running`].
#[derive(Debug, Clone)]
pub struct CountdownController {
    duration_ms: u64,
    interval_ms: u64,
    remaining_ms: u64,
    run_state: RunState,
    run_id: u64,
}

impl CountdownController {
    /// Create an idle controller with the full duration remaining
    pub fn new() -> Self {
        Self::with_timing(COUNTDOWN_DURATION_MS, TICK_INTERVAL_MS)
    }

    fn with_timing(duration_ms: u64, interval_ms: u64) -> Self {
        Self {
            duration_ms,
            interval_ms,
            remaining_ms: duration_ms,
            run_state: RunState::Idle,
            run_id: 0,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Identifies the current run; a tick schedule belongs to exactly one run
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Begin or resume ticking
    pub fn start(&mut self) -> Option<CountdownEvent> {
        match self.run_state {
            RunState::Running => None,
            RunState::Idle => {
                self.run_state = RunState::Running;
                self.run_id += 1;
                Some(CountdownEvent::Started)
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                self.run_id += 1;
                Some(CountdownEvent::Resumed)
            }
        }
    }

    /// Apply one tick; finishes the countdown when nothing remains
    pub fn tick(&mut self) -> Option<CountdownEvent> {
        if !self.run_state.is_running() {
            return None;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.interval_ms);
        if self.remaining_ms == 0 {
            self.finish();
            return Some(CountdownEvent::Finished);
        }

        Some(CountdownEvent::Ticked {
            remaining_ms: self.remaining_ms,
        })
    }

    /// Freeze the remaining time
    pub fn pause(&mut self) -> Option<CountdownEvent> {
        if !self.run_state.is_running() {
            return None;
        }

        self.run_state = RunState::Paused;
        Some(CountdownEvent::Paused {
            remaining_ms: self.remaining_ms,
        })
    }

    /// Reset to the full duration, immediately, whether running or paused
    pub fn stop(&mut self) -> Option<CountdownEvent> {
        if self.run_state == RunState::Idle {
            return None;
        }

        self.finish();
        Some(CountdownEvent::Stopped)
    }

    fn finish(&mut self) {
        self.remaining_ms = self.duration_ms;
        self.run_state = RunState::Idle;
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            run_state: self.run_state,
            remaining_ms: self.remaining_ms,
            duration_ms: self.duration_ms,
            display: time_to_string(self.remaining_ms),
            run_id: self.run_id,
        }
    }
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::new()
    }
}
