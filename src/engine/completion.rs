//! End value detection

use crate::state::Snapshot;

/// Decides when a reduced snapshot should be followed by a `Finish`
#[derive(Debug, Clone, Copy)]
pub struct CompletionWatcher {
    end_value: f64,
}

impl CompletionWatcher {
    pub fn new(end_value: f64) -> Self {
        Self { end_value }
    }

    /// `true` once the value sits exactly on the end value and the timer is not already finished
    pub fn reached_end(&self, snapshot: &Snapshot) -> bool {
        snapshot.value == self.end_value && !snapshot.state.is_finished()
    }
}
