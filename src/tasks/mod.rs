//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod timer_task;

// Re-export main functions
pub use timer_task::timer_task;
