//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::countdown::{CountdownController, CountdownEvent, CountdownSnapshot};

/// Shared application state that owns the countdown and notifies observers
#[derive(Debug)]
pub struct AppState {
    /// The countdown state machine
    pub controller: Arc<Mutex<CountdownController>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for discrete countdown transitions
    pub event_tx: broadcast::Sender<CountdownEvent>,
    /// Channel for the latest countdown snapshot
    pub snapshot_tx: watch::Sender<CountdownSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<CountdownSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle countdown
    pub fn new(port: u16, host: String) -> Self {
        let controller = CountdownController::new();
        let (event_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        Self {
            controller: Arc::new(Mutex::new(controller)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply a transition and notify observers if it changed anything
    pub fn update_countdown<F>(&self, action: &str, transition: F) -> Result<CountdownSnapshot, String>
    where
        F: FnOnce(&mut CountdownController) -> Option<CountdownEvent>,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock countdown: {}", e))?;

        let event = transition(&mut *controller);
        let snapshot = controller.snapshot();
        drop(controller); // Release the lock early

        let Some(event) = event else {
            debug!("Action '{}' had no effect in state {}", action, snapshot.run_state);
            return Ok(snapshot);
        };

        // Ticks are too frequent to count as user actions
        if !matches!(event, CountdownEvent::Ticked { .. } | CountdownEvent::Finished) {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        self.snapshot_tx.send_replace(snapshot.clone());

        // No subscribers is fine, the event log may not be running
        if self.event_tx.send(event).is_err() {
            debug!("No listeners for countdown event {:?}", event);
        }

        Ok(snapshot)
    }

    /// Start or resume the countdown
    pub fn start(&self) -> Result<CountdownSnapshot, String> {
        info!("Play requested");
        self.update_countdown("play", CountdownController::start)
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<CountdownSnapshot, String> {
        info!("Pause requested");
        self.update_countdown("pause", CountdownController::pause)
    }

    /// Stop and reset the countdown
    pub fn stop(&self) -> Result<CountdownSnapshot, String> {
        info!("Stop requested");
        self.update_countdown("stop", CountdownController::stop)
    }

    /// Apply one periodic tick
    pub fn tick(&self) -> Result<CountdownSnapshot, String> {
        self.update_countdown("tick", CountdownController::tick)
    }

    /// Apply a tick scheduled for `run_id`; ticks from an earlier run are dropped
    pub fn tick_run(&self, run_id: u64) -> Result<CountdownSnapshot, String> {
        self.update_countdown("tick", |controller| {
            if controller.run_id() == run_id {
                controller.tick()
            } else {
                None
            }
        })
    }

    /// Play when not running, pause when running
    pub fn toggle(&self) -> Result<CountdownSnapshot, String> {
        info!("Play/pause requested");
        self.update_countdown("play-pause", |controller| {
            if controller.run_state().is_running() {
                controller.pause()
            } else {
                controller.start()
            }
        })
    }

    /// Get current countdown snapshot
    pub fn get_snapshot(&self) -> Result<CountdownSnapshot, String> {
        self.controller.lock()
            .map(|controller| controller.snapshot())
            .map_err(|e| format!("Failed to lock countdown: {}", e))
    }

    /// Interval at which the ticker should call [`AppState::tick_run`]
    pub fn tick_interval(&self) -> Duration {
        match self.controller.lock() {
            Ok(controller) => Duration::from_millis(controller.interval_ms()),
            Err(e) => {
                warn!("Failed to lock countdown for tick interval: {}", e);
                Duration::from_millis(crate::countdown::TICK_INTERVAL_MS)
            }
        }
    }

    /// Subscribe to snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to countdown transitions
    pub fn subscribe_events(&self) -> broadcast::Receiver<CountdownEvent> {
        self.event_tx.subscribe()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::RunState;

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string())
    }

    #[test]
    fn transitions_publish_snapshots() {
        let state = state();
        let rx = state.subscribe_snapshots();

        state.start().unwrap();
        assert_eq!(rx.borrow().run_state, RunState::Running);

        state.tick().unwrap();
        assert_eq!(rx.borrow().remaining_ms, 59_000);
        assert_eq!(rx.borrow().display, "00,00,59");
    }

    #[test]
    fn transitions_broadcast_events() {
        let state = state();
        let mut rx = state.subscribe_events();

        state.start().unwrap();
        state.tick().unwrap();
        state.pause().unwrap();
        state.stop().unwrap();

        assert_eq!(rx.try_recv().unwrap(), CountdownEvent::Started);
        assert_eq!(rx.try_recv().unwrap(), CountdownEvent::Ticked { remaining_ms: 59_000 });
        assert_eq!(rx.try_recv().unwrap(), CountdownEvent::Paused { remaining_ms: 59_000 });
        assert_eq!(rx.try_recv().unwrap(), CountdownEvent::Stopped);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn no_op_transitions_are_silent() {
        let state = state();
        let mut events = state.subscribe_events();
        let mut snapshots = state.subscribe_snapshots();
        snapshots.borrow_and_update();

        state.pause().unwrap();
        state.stop().unwrap();
        state.tick().unwrap();

        assert!(events.try_recv().is_err());
        assert!(!snapshots.has_changed().unwrap());
        assert_eq!(state.get_last_action(), (None, None));
    }

    #[test]
    fn toggle_swaps_between_play_and_pause() {
        let state = state();
        let mut events = state.subscribe_events();

        assert_eq!(state.toggle().unwrap().run_state, RunState::Running);
        state.tick().unwrap();
        assert_eq!(state.toggle().unwrap().run_state, RunState::Paused);
        assert_eq!(state.toggle().unwrap().run_state, RunState::Running);

        assert_eq!(events.try_recv().unwrap(), CountdownEvent::Started);
        assert_eq!(events.try_recv().unwrap(), CountdownEvent::Ticked { remaining_ms: 59_000 });
        assert_eq!(events.try_recv().unwrap(), CountdownEvent::Paused { remaining_ms: 59_000 });
        assert_eq!(events.try_recv().unwrap(), CountdownEvent::Resumed);
        assert_eq!(state.get_last_action().0.as_deref(), Some("play-pause"));
    }

    #[test]
    fn ticks_from_an_earlier_run_are_dropped() {
        let state = state();
        let first_run = state.start().unwrap().run_id;
        state.pause().unwrap();
        let second_run = state.start().unwrap().run_id;
        assert_ne!(first_run, second_run);

        assert_eq!(state.tick_run(first_run).unwrap().remaining_ms, 60_000);
        assert_eq!(state.tick_run(second_run).unwrap().remaining_ms, 59_000);
    }

    #[test]
    fn last_action_tracks_user_operations_only() {
        let state = state();
        state.start().unwrap();
        state.tick().unwrap();

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("play"));
        assert!(time.is_some());
    }

    #[test]
    fn tick_interval_is_one_second() {
        assert_eq!(state().tick_interval(), Duration::from_secs(1));
    }
}
