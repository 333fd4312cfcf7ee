//! External service module
//!
//! This module contains the device feedback played when a countdown ends.

pub mod feedback;

// Re-export main types
pub use feedback::{FeedbackDispatcher, SystemFeedback};
