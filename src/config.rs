//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "egg-timer")]
#[command(about = "A state-managed HTTP service that times boiled eggs")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// File holding the persisted language preference
    #[arg(long, default_value = "egg_timer_prefs.json")]
    pub prefs: PathBuf,

    /// Command run for each alarm tone (terminal bell when unset)
    #[arg(long)]
    pub tone_command: Option<String>,

    /// Command run for each vibration pulse; the pulse length in ms is appended
    #[arg(long)]
    pub vibrate_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
