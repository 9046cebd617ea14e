//! Timer construction options

use std::{fmt, sync::Arc, time::Duration};

use super::{CommandSource, TimerError};

/// Callback invoked with the value of each tick
pub type TickCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Callback invoked once the timer reaches its end value
pub type FinishCallback = Arc<dyn Fn() + Send + Sync>;

/// Everything needed to build a [`Timer`](super::Timer)
#[derive(Clone)]
pub struct TimerOptions {
    pub commands: CommandSource,
    pub start_value: f64,
    pub end_value: f64,
    /// Time between ticks while running
    pub interval: Duration,
    /// Decimal digits kept in every value
    pub precision: u32,
    pub on_tick: Option<TickCallback>,
    pub on_finish: Option<FinishCallback>,
}

impl TimerOptions {
    /// Options without callbacks
    pub fn new(
        commands: CommandSource,
        start_value: f64,
        end_value: f64,
        interval: Duration,
        precision: u32,
    ) -> Self {
        Self {
            commands,
            start_value,
            end_value,
            interval,
            precision,
            on_tick: None,
            on_finish: None,
        }
    }

    pub fn on_tick<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_tick = Some(Arc::new(callback));
        self
    }

    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_finish = Some(Arc::new(callback));
        self
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.interval.is_zero() {
            return Err(TimerError::InvalidInterval(self.interval));
        }
        for (name, value) in [("start value", self.start_value), ("end value", self.end_value)] {
            if !value.is_finite() {
                return Err(TimerError::NonFiniteBound { name, value });
            }
        }
        if self.start_value == self.end_value {
            return Err(TimerError::EmptyRange(self.start_value));
        }
        Ok(())
    }

    /// Direction of counting: +1 counts up, -1 counts down
    pub fn sign(&self) -> f64 {
        if self.end_value > self.start_value { 1.0 } else { -1.0 }
    }
}

impl fmt::Debug for TimerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerOptions")
            .field("commands", &self.commands)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("interval", &self.interval)
            .field("precision", &self.precision)
            .field("on_tick", &self.on_tick.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}
