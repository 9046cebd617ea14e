//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{Command, Projection, TimerState};
use crate::engine::CommandSource;

/// Timer parameters reported back to clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub start_value: f64,
    pub end_value: f64,
    pub interval_ms: u64,
    pub precision: u32,
}

impl TimerSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Application state shared between the HTTP handlers and the timer task
#[derive(Debug)]
pub struct AppState {
    /// Command stream driving the timer
    pub commands: CommandSource,
    pub settings: TimerSettings,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Latest projection published by the timer task
    pub projection_tx: watch::Sender<Projection>,
    /// Keep the receiver alive to prevent channel closure
    pub _projection_rx: watch::Receiver<Projection>,
}

impl AppState {
    /// Create a new AppState with a stopped timer
    pub fn new(port: u16, host: String, settings: TimerSettings) -> Self {
        let initial = Projection::new(TimerState::Stop, settings.start_value);
        let (projection_tx, projection_rx) = watch::channel(initial);

        Self {
            commands: CommandSource::new(Command::Stop),
            settings,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            projection_tx,
            _projection_rx: projection_rx,
        }
    }

    /// Push a command to the timer and record it as the last action
    pub fn send_command(&self, command: Command) -> Result<Projection, String> {
        info!("Sending {} command to timer", command);

        // The command stays current and is picked up by the next subscription
        if let Err(e) = self.commands.send(command) {
            warn!("{}", e);
        }

        let mut last_action = self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *last_action = Some(command.as_str().to_string());
        drop(last_action);

        let mut last_time = self.last_action_time.lock()
            .map_err(|e| format!("Failed to lock last action time: {}", e))?;
        *last_time = Some(Utc::now());
        drop(last_time);

        Ok(self.get_projection())
    }

    /// Publish a projection from the timer task
    pub fn publish_projection(&self, projection: Projection) -> Result<(), String> {
        self.projection_tx
            .send(projection)
            .map_err(|e| format!("Failed to publish timer projection: {}", e))
    }

    /// Latest published projection
    pub fn get_projection(&self) -> Projection {
        *self.projection_tx.borrow()
    }

    /// Receiver notified on every published projection
    pub fn watch_projection(&self) -> watch::Receiver<Projection> {
        self.projection_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TimerSettings {
        TimerSettings {
            start_value: 10.0,
            end_value: 0.0,
            interval_ms: 33,
            precision: 2,
        }
    }

    #[test]
    fn starts_stopped_at_start_value() {
        let state = AppState::new(20553, "127.0.0.1".to_string(), settings());
        assert_eq!(state.get_projection(), Projection::new(TimerState::Stop, 10.0));
        assert_eq!(state.get_last_action(), (None, None));
        assert_eq!(state.settings.interval(), Duration::from_millis(33));
    }

    #[test]
    fn send_command_records_last_action() {
        let state = AppState::new(20553, "127.0.0.1".to_string(), settings());
        state.send_command(Command::Run).unwrap();

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("run"));
        assert!(time.is_some());
        assert_eq!(state.commands.current(), Command::Run);
    }

    #[test]
    fn published_projection_is_visible() {
        let state = AppState::new(20553, "127.0.0.1".to_string(), settings());
        let mut rx = state.watch_projection();

        state.publish_projection(Projection::new(TimerState::Run, 7.25)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Projection::new(TimerState::Run, 7.25));
        assert_eq!(state.get_projection().value, 7.25);
    }

    #[test]
    fn uptime_formats_seconds() {
        let state = AppState::new(20553, "127.0.0.1".to_string(), settings());
        assert!(state.get_uptime().ends_with('s'));
    }
}
