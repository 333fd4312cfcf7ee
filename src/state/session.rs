//! Wizard session: level selection, method selection and the timer screen

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ControlAction, CountdownEngine, TimerState};
use crate::{
    cooking::{CookingMethod, DonenessLevel},
    services::FeedbackDispatcher,
    tasks::TickDriver,
};

/// Screens of the egg timer flow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    LevelSelect,
    MethodSelect,
    Timer,
}

/// Everything a client needs to render the current screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub level: DonenessLevel,
    pub method: CookingMethod,
    pub timer: Option<TimerState>,
    pub clock: Option<String>,
    pub control: Option<ControlAction>,
}

/// One user's walk through the wizard.
///
/// The countdown engine only exists while the timer screen is shown, and the
/// tick driver only while that engine is running.
pub struct Session {
    screen: Screen,
    level: DonenessLevel,
    method: CookingMethod,
    engine: Option<CountdownEngine>,
    driver: Option<TickDriver>,
    feedback: Arc<dyn FeedbackDispatcher>,
}

impl Session {
    pub fn new(feedback: Arc<dyn FeedbackDispatcher>) -> Self {
        Self {
            screen: Screen::LevelSelect,
            level: DonenessLevel::default(),
            method: CookingMethod::default(),
            engine: None,
            driver: None,
            feedback,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn timer_state(&self) -> Option<&TimerState> {
        self.engine.as_ref().map(|engine| engine.state())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let timer = self.timer_state().cloned();
        SessionSnapshot {
            screen: self.screen,
            level: self.level,
            method: self.method,
            clock: timer.as_ref().map(TimerState::clock),
            control: timer.as_ref().map(TimerState::control),
            timer,
        }
    }

    pub fn select_level(&mut self, level: DonenessLevel) {
        self.level = level;
        self.reinitialize();
    }

    pub fn select_method(&mut self, method: CookingMethod) {
        self.method = method;
        self.reinitialize();
    }

    /// Advance to the next screen; entering the timer screen creates a fresh countdown
    pub fn next(&mut self) -> Result<Screen, String> {
        self.screen = match self.screen {
            Screen::LevelSelect => Screen::MethodSelect,
            Screen::MethodSelect => {
                self.engine = Some(CountdownEngine::new(
                    self.level,
                    self.method,
                    Arc::clone(&self.feedback),
                ));
                Screen::Timer
            }
            Screen::Timer => return Err("Already on the timer screen".to_string()),
        };
        info!("Moved to {:?} screen", self.screen);
        Ok(self.screen)
    }

    /// Go back one screen; leaving the timer screen discards the countdown
    pub fn back(&mut self) -> Result<Screen, String> {
        self.screen = match self.screen {
            Screen::LevelSelect => return Err("Already on the first screen".to_string()),
            Screen::MethodSelect => Screen::LevelSelect,
            Screen::Timer => {
                self.discard_timer();
                Screen::MethodSelect
            }
        };
        info!("Moved back to {:?} screen", self.screen);
        Ok(self.screen)
    }

    /// Leave the timer screen from any exit path, e.g. on shutdown
    pub fn leave(&mut self) {
        if self.screen == Screen::Timer {
            info!("Leaving timer screen");
            self.screen = Screen::MethodSelect;
        }
        self.discard_timer();
    }

    pub fn toggle(&mut self) -> Result<(), String> {
        self.engine_mut()?.toggle();
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), String> {
        self.engine_mut()?.start();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), String> {
        self.engine_mut()?.pause();
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), String> {
        self.engine_mut()?.restart();
        Ok(())
    }

    pub fn start_test(&mut self) -> Result<(), String> {
        self.engine_mut()?.start_test();
        Ok(())
    }

    /// One tick from the driver. Stops the driver once the countdown stops.
    pub fn tick(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            self.driver = None;
            return false;
        };

        let fired = engine.tick();
        if !engine.is_running() {
            self.driver = None;
        }
        fired
    }

    /// Make the tick driver match the engine: none unless running, and a
    /// freshly armed one for every new running period
    pub fn sync_driver<F>(&mut self, arm: F)
    where
        F: FnOnce(u64) -> TickDriver,
    {
        let wanted = self
            .engine
            .as_ref()
            .filter(|engine| engine.is_running())
            .map(CountdownEngine::run_generation);

        match wanted {
            None => {
                if self.driver.take().is_some() {
                    debug!("Tick driver released");
                }
            }
            Some(generation)
                if self.driver.as_ref().map(TickDriver::generation) == Some(generation) => {}
            Some(generation) => {
                debug!("Arming tick driver for run {}", generation);
                self.driver = Some(arm(generation));
            }
        }
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    fn reinitialize(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.initialize(self.level, self.method);
            self.driver = None;
        }
    }

    fn discard_timer(&mut self) {
        self.driver = None;
        self.engine = None;
    }

    fn engine_mut(&mut self) -> Result<&mut CountdownEngine, String> {
        self.engine
            .as_mut()
            .ok_or_else(|| "Timer controls are only available on the timer screen".to_string())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("screen", &self.screen)
            .field("level", &self.level)
            .field("method", &self.method)
            .field("engine", &self.engine)
            .field("driver", &self.driver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::feedback::testing::{FeedbackEvent, RecordingFeedback};

    fn session() -> (Session, Arc<RecordingFeedback>) {
        let feedback = Arc::new(RecordingFeedback::default());
        (Session::new(feedback.clone()), feedback)
    }

    fn to_timer(session: &mut Session) {
        session.next().unwrap();
        session.next().unwrap();
    }

    #[test]
    fn test_wizard_flow() {
        let (mut session, _) = session();
        assert_eq!(session.screen(), Screen::LevelSelect);
        assert!(session.back().is_err());
        assert!(session.timer_state().is_none());

        session.select_level(DonenessLevel::Hard);
        assert_eq!(session.next().unwrap(), Screen::MethodSelect);
        session.select_method(CookingMethod::ColdWater);
        assert_eq!(session.next().unwrap(), Screen::Timer);
        assert!(session.next().is_err());

        let snapshot = session.snapshot();
        let timer = snapshot.timer.unwrap();
        assert_eq!(timer.remaining_seconds, 900);
        assert_eq!(snapshot.clock.as_deref(), Some("15:00"));
        assert_eq!(snapshot.control, Some(ControlAction::Start));
    }

    #[test]
    fn test_timer_controls_need_timer_screen() {
        let (mut session, _) = session();
        assert!(session.start().is_err());
        assert!(session.toggle().is_err());
        session.next().unwrap();
        assert!(session.start_test().is_err());
    }

    #[test]
    fn test_back_from_timer_discards_countdown() {
        let (mut session, feedback) = session();
        to_timer(&mut session);
        session.start_test().unwrap();
        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(feedback.count(FeedbackEvent::Alarm), 1);

        assert_eq!(session.back().unwrap(), Screen::MethodSelect);
        assert!(session.timer_state().is_none());
        assert_eq!(feedback.events().last(), Some(&FeedbackEvent::Cancel));

        // A fresh visit starts from the table duration again
        session.next().unwrap();
        assert_eq!(session.timer_state().unwrap().remaining_seconds, 300);
    }

    #[test]
    fn test_selection_change_on_timer_screen_resets() {
        let (mut session, _) = session();
        to_timer(&mut session);
        session.start().unwrap();
        for _ in 0..5 {
            session.tick();
        }

        session.select_level(DonenessLevel::Medium);
        let timer = session.timer_state().unwrap();
        assert!(!timer.is_running);
        assert_eq!(timer.remaining_seconds, 420);
    }

    #[test]
    fn test_leave_cancels_feedback() {
        let (mut session, feedback) = session();
        session.leave();
        assert!(feedback.events().is_empty());

        to_timer(&mut session);
        session.leave();
        assert_eq!(feedback.events(), vec![FeedbackEvent::Cancel]);
        assert_eq!(session.screen(), Screen::MethodSelect);
        assert!(session.timer_state().is_none());
    }

    #[test]
    fn test_tick_without_engine_is_noop() {
        let (mut session, _) = session();
        assert!(!session.tick());
    }
}
