//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{PreferenceStore, Session, SessionSnapshot};
use crate::{
    cooking::Language,
    services::FeedbackDispatcher,
    tasks::TickDriver,
};

/// Shared application state behind the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// The wizard session; every transition happens under this lock
    pub session: Arc<Mutex<Session>>,
    /// Persisted UI language
    pub preferences: PreferenceStore,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel carrying every session change, including ticks
    pub session_update_tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        preferences: PreferenceStore,
        feedback: Arc<dyn FeedbackDispatcher>,
    ) -> Self {
        let session = Session::new(feedback);
        let (session_update_tx, _) = watch::channel(session.snapshot());

        Self {
            session: Arc::new(Mutex::new(session)),
            preferences,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            session_update_tx: Arc::new(session_update_tx),
        }
    }

    /// Apply an action to the session, rearm or release the tick driver to
    /// match, and publish the resulting snapshot
    pub fn update_session<F, T>(&self, action: &str, updater: F) -> Result<SessionSnapshot, String>
    where
        F: FnOnce(&mut Session) -> Result<T, String>,
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let result = updater(&mut *session);

        let shared = Arc::clone(&self.session);
        let updates = Arc::clone(&self.session_update_tx);
        session.sync_driver(|generation| TickDriver::spawn(shared, updates, generation));

        // Publish under the lock so a concurrent tick can never be
        // overwritten by an older snapshot
        let snapshot = session.snapshot();
        if result.is_ok() {
            self.session_update_tx.send_replace(snapshot.clone());
        }
        drop(session);

        result?;

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Get current session snapshot
    pub fn get_snapshot(&self) -> Result<SessionSnapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Subscribe to session snapshots
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.session_update_tx.subscribe()
    }

    pub fn language(&self) -> Language {
        self.preferences.language()
    }

    pub fn set_language(&self, language: Language) -> Result<Language, String> {
        self.preferences
            .set_language(language)
            .map_err(|e| format!("Failed to save language preference: {:#}", e))?;
        Ok(language)
    }

    /// Release the countdown and any alarm feedback, whichever screen is shown
    pub fn leave_timer_screen(&self) {
        match self.update_session("leave", |session| {
            session.leave();
            Ok(())
        }) {
            Ok(_) => info!("Timer screen released"),
            Err(e) => warn!("Failed to release timer screen: {}", e),
        }
    }

    /// Calculate server uptime as a formatted string
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
pub(crate) mod tests {
    use super::*;
    use crate::services::feedback::testing::{FeedbackEvent, RecordingFeedback};
    use crate::state::Screen;
    use std::time::Duration;

    pub(crate) fn test_state(name: &str) -> (Arc<AppState>, Arc<RecordingFeedback>) {
        let dir = std::env::temp_dir().join(format!("egg-timer-app-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        let preferences = PreferenceStore::load(dir.join("prefs.json")).unwrap();
        let feedback = Arc::new(RecordingFeedback::default());
        let state = AppState::new(20554, "127.0.0.1".to_string(), preferences, feedback.clone());
        (Arc::new(state), feedback)
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_session_arms_driver_and_publishes() {
        let (state, feedback) = test_state("arm");
        let mut rx = state.subscribe();

        state.update_session("next", Session::next).unwrap();
        state.update_session("next", Session::next).unwrap();
        let snapshot = state.update_session("test", Session::start_test).unwrap();
        assert_eq!(snapshot.screen, Screen::Timer);
        assert!(snapshot.timer.unwrap().is_running);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        rx.changed().await.unwrap();
        let latest = rx.borrow_and_update().clone();
        let timer = latest.timer.unwrap();
        assert!(timer.alarm_active);
        assert_eq!(latest.clock.as_deref(), Some("0:00"));
        assert_eq!(feedback.count(FeedbackEvent::Alarm), 1);
        assert_eq!(state.get_last_action().0.as_deref(), Some("test"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_published_snapshot_matches_session_under_contention() {
        let mut states = Vec::new();
        for i in 0..20 {
            let (state, _) = test_state(&format!("contention-{}", i));
            state.update_session("next", Session::next).unwrap();
            state.update_session("next", Session::next).unwrap();
            state.update_session("test", Session::start_test).unwrap();
            states.push(state);
        }

        // Hammer every session with no-op starts while the test countdowns run out
        let deadline = std::time::Instant::now() + Duration::from_millis(3_300);
        let workers: Vec<_> = states
            .iter()
            .map(|state| {
                let state = Arc::clone(state);
                std::thread::spawn(move || {
                    while std::time::Instant::now() < deadline {
                        let _ = state.update_session("start", Session::start);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        tokio::time::sleep(Duration::from_millis(700)).await;

        for state in &states {
            let current = state.get_snapshot().unwrap();
            assert!(current.timer.as_ref().unwrap().alarm_active);
            assert_eq!(*state.subscribe().borrow(), current);
        }
    }

    #[tokio::test]
    async fn test_failed_action_is_not_recorded() {
        let (state, _) = test_state("failed");
        let err = state.update_session("start", Session::start).unwrap_err();
        assert!(err.contains("timer screen"));
        assert_eq!(state.get_last_action().0, None);
    }

    #[tokio::test]
    async fn test_leave_timer_screen_cancels_feedback() {
        let (state, feedback) = test_state("leave");
        state.update_session("next", Session::next).unwrap();
        state.update_session("next", Session::next).unwrap();
        state.update_session("start", Session::start).unwrap();

        state.leave_timer_screen();
        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.screen, Screen::MethodSelect);
        assert!(snapshot.timer.is_none());
        assert_eq!(feedback.events(), vec![FeedbackEvent::Cancel]);
        assert!(!state.session.lock().unwrap().has_driver());
    }

    #[tokio::test]
    async fn test_language_round_trip() {
        let (state, _) = test_state("language");
        assert_eq!(state.language(), Language::Turkish);
        state.set_language(Language::English).unwrap();
        assert_eq!(state.language(), Language::English);
    }
}
