//! Completion notification intents and the local scheduler

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::state::TimerEvent;

pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";
pub const NOTIFICATION_BODY: &str = "Congratulations You did it hooray 🥳🥳🥳";

/// Requests the timer raises towards the notification subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationRequest {
    /// Fire a one-shot notification after `after`
    Schedule {
        after: Duration,
        title: String,
        body: String,
    },
    /// Drop any notification scheduled earlier
    CancelPending,
    /// Show the completion alert right away
    Alert { title: String, body: String },
}

impl NotificationRequest {
    /// The completion notification for a run of `total_seconds`
    pub fn completion(total_seconds: u64) -> Self {
        Self::Schedule {
            after: Duration::from_secs(total_seconds),
            title: NOTIFICATION_TITLE.to_string(),
            body: NOTIFICATION_BODY.to_string(),
        }
    }

    /// The in-app alert raised when a run finishes
    pub fn completion_alert() -> Self {
        Self::Alert {
            title: NOTIFICATION_TITLE.to_string(),
            body: NOTIFICATION_BODY.to_string(),
        }
    }

    /// Map a timer transition to the notification intent it implies, if any
    pub fn for_event(event: &TimerEvent) -> Option<Self> {
        match event {
            TimerEvent::Started { total_seconds } => Some(Self::completion(*total_seconds)),
            TimerEvent::Stopped => Some(Self::CancelPending),
            _ => None,
        }
    }
}

/// Receiver of notification intents. Permissions and presentation are the
/// implementor's concern.
pub trait Notifier: Send + Sync + Debug {
    fn dispatch(&self, request: NotificationRequest);
}

/// Schedules notifications as tokio tasks and reports them through tracing.
///
/// At most one notification is pending; scheduling a new one replaces it.
/// Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct LocalNotifier {
    pending: Mutex<Option<JoinHandle<()>>>,
    delivered: Arc<AtomicU64>,
}

impl LocalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications and alerts shown so far
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }

    /// Whether a scheduled notification has yet to fire
    pub fn has_pending(&self) -> bool {
        match self.pending.lock() {
            Ok(pending) => pending.as_ref().is_some_and(|handle| !handle.is_finished()),
            Err(_) => false,
        }
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) {
        match self.pending.lock() {
            Ok(mut pending) => {
                if let Some(previous) = pending.take() {
                    previous.abort();
                }
                *pending = handle;
            }
            Err(e) => {
                warn!("Failed to lock pending notification: {}", e);
                if let Some(handle) = handle {
                    handle.abort();
                }
            }
        }
    }
}

impl Notifier for LocalNotifier {
    fn dispatch(&self, request: NotificationRequest) {
        match request {
            NotificationRequest::Schedule { after, title, body } => {
                debug!("Scheduling notification in {}s", after.as_secs());
                let delivered = Arc::clone(&self.delivered);
                let handle = tokio::spawn(async move {
                    sleep(after).await;
                    info!("🔔 {}: {}", title, body);
                    delivered.fetch_add(1, Ordering::SeqCst);
                });
                self.replace_pending(Some(handle));
            }
            NotificationRequest::CancelPending => {
                debug!("Cancelling pending notifications");
                self.replace_pending(None);
            }
            NotificationRequest::Alert { title, body } => {
                info!("{}: {}", title, body);
                self.delivered.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}
