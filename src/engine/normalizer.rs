//! Consecutive duplicate command suppression

use crate::state::TimerState;

/// Lets a command through only if it differs from the last one let through
#[derive(Debug, Default)]
pub struct CommandNormalizer {
    last: Option<TimerState>,
}

impl CommandNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `command` should be acted on
    pub fn admit(&mut self, command: TimerState) -> bool {
        if self.last == Some(command) {
            return false;
        }
        self.last = Some(command);
        true
    }
}
