//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TimerEvent};

/// Background task that delivers one `tick()` per `period` while a run is active.
///
/// The cadence restarts whenever a new run begins, so the first tick of a
/// run lands one full period after `start()`. Other snapshot updates, such as
/// configuration changes, leave the cadence alone.
pub async fn tick_task(state: Arc<AppState>, period: Duration) {
    info!("Starting ticker task ({}ms period)", period.as_millis());

    let mut snapshot_rx = state.subscribe();

    loop {
        // Wait until a run is in progress
        let mut run_id = loop {
            let snapshot = snapshot_rx.borrow_and_update().clone();
            if snapshot.is_running {
                break snapshot.run_id;
            }
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, stopping ticker task");
                return;
            }
        };

        debug!("Run in progress, ticking every {}ms", period.as_millis());
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(Some(TimerEvent::Finished { .. })) => break,
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            debug!("Tick delivered after run ended");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            break;
                        }
                    }
                }

                // Stop or restart - check whether the cadence still applies
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        debug!("Snapshot channel closed, stopping ticker task");
                        return;
                    }
                    let snapshot = snapshot_rx.borrow_and_update().clone();
                    if !snapshot.is_running {
                        debug!("Run ended, ticker idle");
                        break;
                    }
                    if snapshot.run_id != run_id {
                        debug!("Run {} started, restarting cadence", snapshot.run_id);
                        run_id = snapshot.run_id;
                        interval.reset();
                    }
                }
            }
        }
    }
}
