//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{TimerEngine, TimerEvent, TimerSnapshot};
use crate::{
    error::TimerError,
    services::{NotificationRequest, Notifier},
};

/// Shared owner of the timer engine.
///
/// Every command runs under one short lock, then publishes the new snapshot
/// to watchers, broadcasts the event and hands any notification intent to the
/// notifier after the lock is released.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<TimerEngine>,
    notifier: Arc<dyn Notifier>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Channel for timer transitions
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState around an idle engine
    pub fn new(port: u16, host: String, notifier: Arc<dyn Notifier>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::default());

        Self {
            engine: Mutex::new(TimerEngine::new()),
            notifier,
            start_time: Instant::now(),
            port,
            host,
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, TimerError> {
        self.engine
            .lock()
            .map_err(|e| TimerError::StatePoisoned(e.to_string()))
    }

    /// Apply a command to the engine and fan out its results
    fn apply<T, F>(&self, action: &str, command: F) -> Result<(T, TimerSnapshot), TimerError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<T, TimerError>,
        T: Into<Option<TimerEvent>> + Clone,
    {
        let mut engine = self.lock_engine()?;
        let outcome = match command(&mut *engine) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Rejected {}: {}", action, e);
                return Err(e);
            }
        };
        let snapshot = TimerSnapshot::capture(&engine);
        drop(engine); // Release the lock early

        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send snapshot update: {}", e);
        }

        let event: Option<TimerEvent> = outcome.clone().into();
        if let Some(event) = event {
            // No subscribers is fine
            let _ = self.event_tx.send(event);

            if let Some(request) = NotificationRequest::for_event(&event) {
                self.notifier.dispatch(request);
            }
        }

        Ok((outcome, snapshot))
    }

    /// Set the duration for the next run
    pub fn configure(&self, hours: u32, minutes: u32, seconds: u32) -> Result<TimerSnapshot, TimerError> {
        let (_, snapshot) = self.apply("configure", |engine| engine.configure(hours, minutes, seconds))?;
        info!("Timer configured for {}", super::format_hms(snapshot.pending.total_seconds()));
        Ok(snapshot)
    }

    /// Drop the pending duration, as when the configuration sheet is dismissed
    pub fn dismiss_configuration(&self) -> Result<TimerSnapshot, TimerError> {
        let (_, snapshot) = self.apply("dismiss", |engine| {
            engine.clear_pending()?;
            Ok(None::<TimerEvent>)
        })?;
        debug!("Pending configuration cleared");
        Ok(snapshot)
    }

    /// Start a run of the pending duration
    pub fn start(&self) -> Result<TimerSnapshot, TimerError> {
        let (_, snapshot) = self.apply("start", TimerEngine::start)?;
        info!("Timer started for {}", snapshot.display);
        Ok(snapshot)
    }

    /// Advance the run by one second; `None` when nothing is running
    pub fn tick(&self) -> Result<Option<TimerEvent>, TimerError> {
        let (event, snapshot) = self.apply("tick", |engine| Ok(engine.tick()))?;
        match event {
            Some(TimerEvent::Finished { total_seconds }) => {
                info!("Timer finished after {}", super::format_hms(total_seconds));
            }
            Some(_) => debug!("Tick: {} remaining", snapshot.display),
            None => {}
        }
        Ok(event)
    }

    /// Reset to idle and cancel any pending notification
    pub fn stop(&self) -> Result<TimerSnapshot, TimerError> {
        let (event, snapshot) = self.apply("stop", |engine| Ok(engine.stop()))?;
        if event.is_some() {
            info!("Timer stopped");
        } else {
            debug!("Stop requested while idle");
        }
        Ok(snapshot)
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.lock_engine().map(|engine| TimerSnapshot::capture(&engine))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to timer transitions
    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// The notifier that receives this state's notification intents
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Calculate server uptime as `HH:MM:SS`
    pub fn get_uptime(&self) -> String {
        super::format_hms(self.start_time.elapsed().as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingNotifier {
        requests: Mutex<Vec<NotificationRequest>>,
    }

    impl Notifier for RecordingNotifier {
        fn dispatch(&self, request: NotificationRequest) {
            self.requests.lock().unwrap().push(request);
        }
    }

    fn app() -> (AppState, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::new(0, "127.0.0.1".to_string(), notifier.clone());
        (state, notifier)
    }

    #[test]
    fn start_schedules_and_stop_cancels_notification() {
        let (state, notifier) = app();
        state.configure(0, 1, 30).unwrap();
        state.start().unwrap();
        state.stop().unwrap();

        let requests = notifier.requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![NotificationRequest::completion(90), NotificationRequest::CancelPending]
        );
    }

    #[test]
    fn stop_while_idle_dispatches_nothing() {
        let (state, notifier) = app();
        let snapshot = state.stop().unwrap();

        assert!(!snapshot.is_running);
        assert!(notifier.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn rejected_start_publishes_nothing() {
        let (state, notifier) = app();
        let mut rx = state.subscribe();
        let _ = rx.borrow_and_update();

        assert_eq!(state.start(), Err(TimerError::ZeroDuration));
        assert!(!rx.has_changed().unwrap());
        assert!(notifier.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn watchers_see_each_tick() {
        let (state, _) = app();
        let rx = state.subscribe();
        state.configure(0, 0, 3).unwrap();
        state.start().unwrap();
        state.tick().unwrap();

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.remaining_seconds, 2);
        assert_eq!(snapshot.display, "00:00:02");
    }

    #[test]
    fn events_are_broadcast_in_order() {
        let (state, _) = app();
        let mut rx = state.subscribe_events();
        state.configure(0, 0, 1).unwrap();
        state.start().unwrap();
        state.tick().unwrap();

        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Configured { total_seconds: 1 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Started { total_seconds: 1 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Finished { total_seconds: 1 });
    }

    #[test]
    fn configure_during_a_run_publishes_nothing() {
        let (state, _) = app();
        state.configure(0, 0, 5).unwrap();
        state.start().unwrap();
        let mut rx = state.subscribe();
        let _ = rx.borrow_and_update();

        assert_eq!(state.configure(0, 1, 0), Err(TimerError::AlreadyRunning));
        assert_eq!(state.dismiss_configuration(), Err(TimerError::AlreadyRunning));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(state.snapshot().unwrap().pending.total_seconds(), 5);
    }

    #[test]
    fn uptime_is_formatted_as_hms() {
        let (state, _) = app();
        assert_eq!(state.get_uptime(), "00:00:00");
    }

    #[test]
    fn dismiss_clears_pending_duration() {
        let (state, _) = app();
        state.configure(0, 5, 0).unwrap();
        let snapshot = state.dismiss_configuration().unwrap();

        assert!(!snapshot.can_confirm);
        assert_eq!(snapshot.pending.total_seconds(), 0);
    }
}
