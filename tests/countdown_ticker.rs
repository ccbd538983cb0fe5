use std::{sync::Arc, time::Duration};

use countdown_timer::{tasks::countdown_ticker_task, AppState, CountdownEvent, RunState};
use tokio::time::sleep;

fn spawn_state() -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    tokio::spawn(countdown_ticker_task(Arc::clone(&state)));
    state
}

#[tokio::test(start_paused = true)]
async fn full_countdown_finishes_and_resets() {
    let state = spawn_state();
    let mut events = state.subscribe_events();

    state.start().unwrap();
    sleep(Duration::from_millis(30_500)).await;
    let halfway = state.get_snapshot().unwrap();
    assert_eq!(halfway.run_state, RunState::Running);
    assert_eq!(halfway.remaining_ms, 30_000);
    assert_eq!(halfway.display, "00,00,30");

    sleep(Duration::from_secs(30)).await;
    let done = state.get_snapshot().unwrap();
    assert_eq!(done.run_state, RunState::Idle);
    assert_eq!(done.remaining_ms, 60_000);

    assert_eq!(events.recv().await.unwrap(), CountdownEvent::Started);
    let mut ticks = 0;
    loop {
        match events.recv().await.unwrap() {
            CountdownEvent::Ticked { .. } => ticks += 1,
            CountdownEvent::Finished => break,
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(ticks, 59);
}

#[tokio::test(start_paused = true)]
async fn pause_halts_ticks_until_resumed() {
    let state = spawn_state();

    state.start().unwrap();
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(state.pause().unwrap().remaining_ms, 57_000);

    sleep(Duration::from_secs(10)).await;
    let paused = state.get_snapshot().unwrap();
    assert_eq!(paused.run_state, RunState::Paused);
    assert_eq!(paused.remaining_ms, 57_000);

    state.start().unwrap();
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_ms, 55_000);
}

#[tokio::test(start_paused = true)]
async fn stop_resets_and_cancels_ticks() {
    let state = spawn_state();

    state.start().unwrap();
    sleep(Duration::from_millis(5_500)).await;
    let stopped = state.stop().unwrap();
    assert_eq!(stopped.run_state, RunState::Idle);
    assert_eq!(stopped.remaining_ms, 60_000);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_ms, 60_000);
}

#[tokio::test(start_paused = true)]
async fn repeated_start_does_not_speed_up_ticks() {
    let state = spawn_state();

    state.start().unwrap();
    sleep(Duration::from_millis(1_500)).await;
    state.start().unwrap();
    state.start().unwrap();
    sleep(Duration::from_secs(2)).await;

    let snapshot = state.get_snapshot().unwrap();
    assert_eq!(snapshot.run_state, RunState::Running);
    assert_eq!(snapshot.remaining_ms, 57_000);
}

#[tokio::test(start_paused = true)]
async fn quick_resume_waits_a_full_interval() {
    let state = spawn_state();

    state.start().unwrap();
    sleep(Duration::from_millis(1_500)).await;
    state.pause().unwrap();
    state.start().unwrap();

    // The old schedule would have ticked at 2.0s
    sleep(Duration::from_millis(600)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_ms, 59_000);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_ms, 58_000);
}

#[tokio::test(start_paused = true)]
async fn quick_restart_waits_a_full_interval() {
    let state = spawn_state();

    state.start().unwrap();
    sleep(Duration::from_millis(1_900)).await;
    state.stop().unwrap();
    state.start().unwrap();

    sleep(Duration::from_millis(200)).await;
    let snapshot = state.get_snapshot().unwrap();
    assert_eq!(snapshot.run_state, RunState::Running);
    assert_eq!(snapshot.remaining_ms, 60_000);

    sleep(Duration::from_millis(900)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_ms, 59_000);
}
