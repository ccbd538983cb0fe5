//! Countdown ticker background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that drives the periodic tick while the countdown is running
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut snapshot_rx = state.subscribe_snapshots();
    let period = state.tick_interval();

    loop {
        // Wait for the countdown to be started
        let run_id = {
            let snapshot = snapshot_rx.borrow_and_update();
            snapshot.run_state.is_running().then_some(snapshot.run_id)
        };
        let Some(run_id) = run_id else {
            if snapshot_rx.changed().await.is_err() {
                error!("Countdown snapshot channel closed, stopping ticker");
                return;
            }
            continue;
        };

        debug!("Countdown run {} started, ticking every {:?}", run_id, period);

        // First tick lands one full interval after (re)start
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick_run(run_id) {
                        Ok(snapshot) if snapshot.run_id != run_id || !snapshot.run_state.is_running() => {
                            debug!("Run {} over on tick ({})", run_id, snapshot.run_state);
                            break;
                        }
                        Ok(snapshot) => {
                            debug!("Tick: {} remaining", snapshot.display);
                        }
                        Err(e) => {
                            error!("Failed to apply countdown tick: {}", e);
                            break;
                        }
                    }
                }

                // Pause, stop or a new run cancels this schedule
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        error!("Countdown snapshot channel closed, stopping ticker");
                        return;
                    }
                    let snapshot = snapshot_rx.borrow_and_update();
                    if snapshot.run_id != run_id || !snapshot.run_state.is_running() {
                        debug!("Run {} cancelled, rescheduling", run_id);
                        break;
                    }
                }
            }
        }
    }
}
