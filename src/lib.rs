//! Egg Timer - A state-managed HTTP service for timing boiled eggs
//!
//! A client walks through picking a doneness level and a cooking method,
//! then drives a one-second countdown that raises vibration and tone alerts
//! when the egg is done.

pub mod api;
pub mod config;
pub mod cooking;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
