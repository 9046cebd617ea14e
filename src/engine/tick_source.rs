//! Tick generation for the active command

use std::{future, time::Duration};

use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::state::TimerState;

/// Marker source for the most recent command
///
/// Only one source is alive at a time: switching replaces (and drops) the
/// previous one, so a superseded interval can never fire again.
#[derive(Debug)]
pub enum TickSource {
    /// Nothing to generate until the next command
    Idle,
    /// `Run` markers every period, the first one immediately
    Periodic(Interval),
}

impl TickSource {
    /// Switch to the source for `command`
    ///
    /// Returns the single marker a non-`Run` command passes through, which the
    /// caller must reduce right away.
    pub fn switch(&mut self, command: TimerState, period: Duration) -> Option<TimerState> {
        match command {
            TimerState::Run => {
                let mut ticks = interval(period);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                *self = TickSource::Periodic(ticks);
                None
            }
            TimerState::Pause | TimerState::Stop | TimerState::Finish => {
                *self = TickSource::Idle;
                Some(command)
            }
        }
    }

    /// Wait for the next generated marker
    ///
    /// Cancel safe; never resolves while idle.
    pub async fn next(&mut self) -> TimerState {
        match self {
            TickSource::Idle => future::pending::<TimerState>().await,
            TickSource::Periodic(ticks) => {
                ticks.tick().await;
                TimerState::Run
            }
        }
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self, TickSource::Periodic(_))
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn run_ticks_immediately_then_every_period() {
        let mut source = TickSource::Idle;
        assert_eq!(source.switch(TimerState::Run, Duration::from_millis(33)), None);
        assert!(source.is_ticking());

        let started = Instant::now();
        assert_eq!(source.next().await, TimerState::Run);
        assert_eq!(Instant::now(), started);

        assert_eq!(source.next().await, TimerState::Run);
        assert_eq!(Instant::now() - started, Duration::from_millis(33));
    }

    #[tokio::test(start_paused = true)]
    async fn other_commands_pass_through_once_and_cancel_ticks() {
        let mut source = TickSource::Idle;
        source.switch(TimerState::Run, Duration::from_millis(33));

        assert_eq!(
            source.switch(TimerState::Pause, Duration::from_millis(33)),
            Some(TimerState::Pause)
        );
        assert!(!source.is_ticking());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(source.next().now_or_never().is_none());
    }
}
