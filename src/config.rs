//! Configuration and CLI argument handling

use clap::Parser;
use std::time::Duration;

use crate::group::GroupConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timers")]
#[command(about = "Run a group of countdown timers from the terminal")]
#[command(version)]
pub struct Config {
    /// Timers to create at startup, as MM:SS
    pub durations: Vec<String>,

    /// Tick period in milliseconds
    #[arg(short, long, default_value = "500")]
    pub interval_ms: u64,

    /// Name of the shared mount point the progress bars are drawn into
    #[arg(short, long, default_value = "timers")]
    pub mount: String,

    /// Run headless, without progress bars
    #[arg(long)]
    pub no_ui: bool,

    /// Remove a timer's bar once it stops or completes
    #[arg(long)]
    pub cleanup: bool,

    /// Start the startup timers immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Print replies and notifications as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Group settings derived from the flags
    pub fn group_config(&self) -> GroupConfig {
        let config = if self.no_ui {
            GroupConfig::new()
        } else {
            GroupConfig::with_ui(self.mount.clone())
        };
        config.cleanup_on_delete(self.cleanup)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
