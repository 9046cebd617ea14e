//! Countdown Timer - A reactive countdown/count-up timer engine
//!
//! This library provides a timer engine that turns a stream of run, pause and
//! stop commands into a live stream of rounded timer snapshots, plus an HTTP
//! surface that drives one timer.

pub mod config;
pub mod state;
pub mod engine;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Command, Projection, TimerState};
pub use engine::{CommandSource, SnapshotStream, Timer, TimerError, TimerOptions};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
