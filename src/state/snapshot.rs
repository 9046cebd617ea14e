//! Timer snapshot and its public projection

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::TimerState;

/// Full internal timer record at one instant
///
/// Owned by the engine loop and replaced wholesale on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub value: f64,
    /// Instant the current run segment began
    pub start_date: Instant,
    /// Instant this snapshot was produced
    pub current_date: Instant,
    pub state: TimerState,
}

impl Snapshot {
    /// Seed snapshot for a fresh subscription
    pub fn initial(state: TimerState, start_value: f64, now: Instant) -> Self {
        Self {
            value: start_value,
            start_date: now,
            current_date: now,
            state,
        }
    }
}

/// Externally visible view of a [`Snapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub timer_state: TimerState,
    pub value: f64,
}

impl Projection {
    pub fn new(timer_state: TimerState, value: f64) -> Self {
        Self { timer_state, value }
    }
}
