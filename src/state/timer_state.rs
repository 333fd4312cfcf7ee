//! Timer state structure and management

use serde::{Deserialize, Serialize};

use crate::cooking::format_clock;

/// Countdown state for one visit to the timer screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub alarm_active: bool,
    /// Running the fixed 3-second preview instead of the table duration
    pub test_mode: bool,
}

/// What the combined Start/Pause control does in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlAction {
    Start,
    Pause,
    Restart,
}

impl TimerState {
    /// Create an idle timer state with the full duration remaining
    pub fn idle(total_seconds: u32) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            is_running: false,
            alarm_active: false,
            test_mode: false,
        }
    }

    /// Check if the countdown has finished
    pub fn is_finished(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Remaining time as "m:ss"
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn control(&self) -> ControlAction {
        if self.is_running {
            ControlAction::Pause
        } else if self.is_finished() {
            ControlAction::Restart
        } else {
            ControlAction::Start
        }
    }
}
