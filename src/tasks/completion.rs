//! Completion alert background task

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{
    services::{NotificationRequest, Notifier},
    state::{format_hms, TimerEvent},
};

/// Background task that raises the completion alert when a run finishes.
///
/// Returns once the event channel closes.
pub async fn completion_task(mut event_rx: broadcast::Receiver<TimerEvent>, notifier: Arc<dyn Notifier>) {
    info!("Starting completion task");

    loop {
        match event_rx.recv().await {
            Ok(TimerEvent::Finished { total_seconds }) => {
                info!("Run of {} completed", format_hms(total_seconds));
                notifier.dispatch(NotificationRequest::completion_alert());
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("Completion task lagged behind by {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping completion task");
                break;
            }
        }
    }
}
