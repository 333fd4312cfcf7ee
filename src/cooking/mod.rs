//! Cooking domain module
//!
//! This module contains the doneness/method enumerations, the duration table
//! and the localized text that goes with them.

pub mod duration;
pub mod labels;

// Re-export main types
pub use duration::{total_seconds, CookingMethod, DonenessLevel, TEST_MODE_SECONDS};
pub use labels::{format_clock, Language};
