//! Countdown engine: the egg timer state machine
//!
//! The engine owns one `TimerState` and moves it between idle/paused,
//! running and alarm. It never sleeps or spawns; `tick` is driven from
//! outside once per second while the timer is running.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::TimerState;
use crate::{
    cooking::{total_seconds, CookingMethod, DonenessLevel, TEST_MODE_SECONDS},
    services::FeedbackDispatcher,
};

pub struct CountdownEngine {
    state: TimerState,
    feedback: Arc<dyn FeedbackDispatcher>,
    /// Bumped every time the countdown enters RUNNING from scratch or resumes
    run_generation: u64,
}

impl CountdownEngine {
    /// Create an idle engine for the given selection
    pub fn new(
        level: DonenessLevel,
        method: CookingMethod,
        feedback: Arc<dyn FeedbackDispatcher>,
    ) -> Self {
        Self {
            state: TimerState::idle(total_seconds(level, method)),
            feedback,
            run_generation: 0,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Identifies the current running period; changes whenever a new one begins
    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    /// Reset to a fresh idle countdown for a new selection.
    /// Progress of an in-flight countdown is discarded, and test mode ends.
    pub fn initialize(&mut self, level: DonenessLevel, method: CookingMethod) {
        let had_alarm = self.state.alarm_active;
        self.state = TimerState::idle(total_seconds(level, method));
        debug!("Countdown initialized: {:?}/{:?} = {}s", level, method, self.state.total_seconds);

        if had_alarm {
            self.cancel_feedback();
        }
    }

    /// Resume or begin counting down. Ignored when no time is left.
    pub fn start(&mut self) -> bool {
        if self.state.is_finished() {
            debug!("Ignoring start with no time remaining");
            return false;
        }
        if !self.state.is_running {
            self.state.is_running = true;
            self.run_generation += 1;
            info!("Countdown started at {}s remaining", self.state.remaining_seconds);
        }
        true
    }

    pub fn pause(&mut self) {
        if self.state.is_running {
            info!("Countdown paused at {}s remaining", self.state.remaining_seconds);
        }
        self.state.is_running = false;
    }

    /// Run the full duration again from the top
    pub fn restart(&mut self) {
        let had_alarm = self.state.alarm_active;
        self.state.remaining_seconds = self.state.total_seconds;
        self.state.alarm_active = false;
        self.state.is_running = true;
        self.run_generation += 1;
        info!("Countdown restarted at {}s", self.state.total_seconds);

        if had_alarm {
            self.cancel_feedback();
        }
    }

    /// Replace the countdown with the short preview run
    pub fn start_test(&mut self) {
        let had_alarm = self.state.alarm_active;
        self.state = TimerState {
            total_seconds: TEST_MODE_SECONDS,
            remaining_seconds: TEST_MODE_SECONDS,
            is_running: true,
            alarm_active: false,
            test_mode: true,
        };
        self.run_generation += 1;
        info!("Test countdown started ({}s)", TEST_MODE_SECONDS);

        if had_alarm {
            self.cancel_feedback();
        }
    }

    /// The Start/Pause control: pause when running, restart when finished,
    /// start otherwise
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.pause();
        } else if self.state.is_finished() {
            self.restart();
        } else {
            self.start();
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns true when this tick fired the alarm. Ticks while paused or
    /// after reaching zero change nothing.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running || self.state.is_finished() {
            return false;
        }

        self.state.remaining_seconds -= 1;
        if !self.state.is_finished() {
            return false;
        }

        self.state.is_running = false;
        self.state.alarm_active = true;
        info!("Countdown finished, alarm triggered");
        if let Err(e) = self.feedback.on_alarm() {
            warn!("Alarm feedback failed: {}", e);
        }
        true
    }

    fn cancel_feedback(&self) {
        if let Err(e) = self.feedback.cancel_alarm() {
            warn!("Failed to cancel alarm feedback: {}", e);
        }
    }
}

impl Drop for CountdownEngine {
    /// Leaving the timer screen always stops feedback, whatever the exit path
    fn drop(&mut self) {
        self.state.is_running = false;
        self.cancel_feedback();
    }
}

impl std::fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("state", &self.state)
            .field("run_generation", &self.run_generation)
            .finish()
    }
}
