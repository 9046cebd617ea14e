//! Timer state and command enums

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running state of a timer
///
/// `Run`, `Pause` and `Stop` mirror the last command that was requested.
/// `Finish` is only ever asserted by the engine once the end value is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Run,
    Pause,
    Stop,
    Finish,
}

impl TimerState {
    /// Check if the timer is counting
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Run)
    }

    /// Check if the timer reached its end value
    pub fn is_finished(&self) -> bool {
        matches!(self, TimerState::Finish)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Run => "run",
            TimerState::Pause => "pause",
            TimerState::Stop => "stop",
            TimerState::Finish => "finish",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command that callers may push into a timer
///
/// This is the externally issuable subset of [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Run,
    Pause,
    Stop,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        TimerState::from(*self).as_str()
    }
}

impl From<Command> for TimerState {
    fn from(command: Command) -> Self {
        match command {
            Command::Run => TimerState::Run,
            Command::Pause => TimerState::Pause,
            Command::Stop => TimerState::Stop,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_onto_matching_states() {
        assert_eq!(TimerState::from(Command::Run), TimerState::Run);
        assert_eq!(TimerState::from(Command::Pause), TimerState::Pause);
        assert_eq!(TimerState::from(Command::Stop), TimerState::Stop);
    }

    #[test]
    fn states_serialize_lowercase() {
        let json = serde_json::to_string(&TimerState::Finish).unwrap();
        assert_eq!(json, "\"finish\"");

        let command: Command = serde_json::from_str("\"pause\"").unwrap();
        assert_eq!(command, Command::Pause);
    }

    #[test]
    fn finish_is_not_a_command() {
        assert!(serde_json::from_str::<Command>("\"finish\"").is_err());
    }
}
