//! State management module
//!
//! This module contains the timer data model and the application state shared
//! with the HTTP layer.

pub mod app_state;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerSettings};
pub use snapshot::{Projection, Snapshot};
pub use timer_state::{Command, TimerState};
