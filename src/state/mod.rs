//! State management module
//!
//! This module contains the countdown state machine, the wizard session that
//! owns it, the persisted preferences and the shared application state.

pub mod app_state;
pub mod engine;
pub mod preferences;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use engine::CountdownEngine;
pub use preferences::PreferenceStore;
pub use session::{Screen, Session, SessionSnapshot};
pub use timer_state::{ControlAction, TimerState};
