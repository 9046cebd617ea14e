//! Engine error types

use std::time::Duration;

use thiserror::Error;

use crate::state::Command;

/// Reasons a timer configuration is rejected at construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    #[error("tick interval must be greater than zero, got {0:?}")]
    InvalidInterval(Duration),
    #[error("{name} must be a finite number, got {value}")]
    NonFiniteBound { name: &'static str, value: f64 },
    #[error("start and end value are both {0}, nothing to count")]
    EmptyRange(f64),
}

/// Failure to push a command into a [`CommandSource`](super::CommandSource)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No subscription is listening; the command is still kept as the current value
    #[error("no timer is subscribed to receive {0}")]
    NoSubscribers(Command),
}
