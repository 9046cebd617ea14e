//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::TimerSettings;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A reactive countdown timer controlled over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Value the timer starts from
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    pub start_value: f64,

    /// Value at which the timer finishes
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub end_value: f64,

    /// Milliseconds between ticks while running
    #[arg(short, long, default_value = "33")]
    pub interval_ms: u64,

    /// Decimal digits kept in timer values
    #[arg(long, default_value = "2")]
    pub precision: u32,

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

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Timer parameters as reported by the status endpoint
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            start_value: self.start_value,
            end_value: self.end_value,
            interval_ms: self.interval_ms,
            precision: self.precision,
        }
    }
}
