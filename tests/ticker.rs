use std::{sync::Arc, time::Duration};

use pomodoro_timer::{
    services::LocalNotifier,
    state::{AppState, TimerPhase},
    tasks::tick_task,
};
use tokio::time::sleep;

fn spawn_ticker() -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Arc::new(LocalNotifier::new())));
    tokio::spawn(tick_task(Arc::clone(&state), Duration::from_secs(1)));
    state
}

#[tokio::test(start_paused = true)]
async fn ticker_counts_down_to_completion() {
    let state = spawn_ticker();
    state.configure(0, 0, 3).unwrap();
    state.start().unwrap();

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 2);

    sleep(Duration::from_secs(2)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert!(snapshot.is_finished);
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.progress, 1.0);
}

#[tokio::test(start_paused = true)]
async fn ticker_does_not_tick_an_idle_timer() {
    let state = spawn_ticker();
    state.configure(0, 0, 3).unwrap();

    sleep(Duration::from_secs(5)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.phase, TimerPhase::Configured);
    assert_eq!(snapshot.remaining_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn stopping_halts_the_countdown() {
    let state = spawn_ticker();
    state.configure(0, 0, 10).unwrap();
    state.start().unwrap();

    sleep(Duration::from_millis(2500)).await;
    state.stop().unwrap();
    sleep(Duration::from_secs(5)).await;

    let snapshot = state.snapshot().unwrap();
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.total_seconds, 0);
    assert_eq!(snapshot.remaining_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn restarted_run_gets_a_fresh_cadence() {
    let state = spawn_ticker();
    state.configure(0, 0, 10).unwrap();
    state.start().unwrap();

    sleep(Duration::from_millis(1500)).await;
    state.stop().unwrap();
    state.start().unwrap();

    sleep(Duration::from_millis(700)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 10);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 9);
}

#[tokio::test(start_paused = true)]
async fn configure_calls_during_a_run_do_not_delay_ticks() {
    let state = spawn_ticker();
    state.configure(0, 0, 5).unwrap();
    state.start().unwrap();

    for _ in 0..6 {
        sleep(Duration::from_millis(900)).await;
        let _ = state.configure(0, 0, 5);
        let _ = state.dismiss_configuration();
    }

    let snapshot = state.snapshot().unwrap();
    assert!(snapshot.is_finished);
    assert_eq!(snapshot.remaining_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn republished_snapshots_of_the_same_run_keep_the_cadence() {
    let state = spawn_ticker();
    state.configure(0, 0, 5).unwrap();
    state.start().unwrap();

    for _ in 0..6 {
        sleep(Duration::from_millis(900)).await;
        let current = state.snapshot().unwrap();
        state.snapshot_tx.send(current).unwrap();
    }

    let snapshot = state.snapshot().unwrap();
    assert!(snapshot.is_finished);
    assert_eq!(snapshot.remaining_seconds, 0);
}
