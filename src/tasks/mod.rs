//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server.

pub mod ticker;

// Re-export main types
pub use ticker::{TickDriver, TICK_PERIOD};
