//! Countdown event logging task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{countdown::CountdownEvent, state::AppState};

/// Background task that records every countdown transition
pub async fn event_log_task(state: Arc<AppState>) {
    info!("Starting countdown event log task");

    let mut event_rx = state.subscribe_events();

    loop {
        match event_rx.recv().await {
            Ok(CountdownEvent::Started) => info!("Countdown started"),
            Ok(CountdownEvent::Resumed) => info!("Countdown resumed"),
            Ok(CountdownEvent::Ticked { remaining_ms }) => {
                debug!(remaining_ms, "Countdown ticked");
            }
            Ok(CountdownEvent::Paused { remaining_ms }) => {
                info!(remaining_ms, "Countdown paused");
            }
            Ok(CountdownEvent::Stopped) => info!("Countdown stopped and reset"),
            Ok(CountdownEvent::Finished) => info!("Countdown finished and reset"),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event log lagged, skipped {} countdown events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Countdown event channel closed");
                break;
            }
        }
    }
}
