//! Snapshot state transitions
//!
//! The reducer folds a marker (an external command or a generated `Run` tick)
//! into the previous snapshot. It never touches the clock or runs callbacks
//! itself: the caller passes `now` and dispatches the returned [`Effect`].

use tokio::time::Instant;

use super::{projector::round_to_precision, TimerOptions};
use crate::state::{Snapshot, TimerState};

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Tick(f64),
    Finish,
}

/// Result of one reduction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub snapshot: Snapshot,
    pub effect: Option<Effect>,
}

impl Step {
    fn quiet(snapshot: Snapshot) -> Self {
        Self { snapshot, effect: None }
    }
}

/// Pure transition function over [`Snapshot`]s
#[derive(Debug, Clone, Copy)]
pub struct Reducer {
    start_value: f64,
    end_value: f64,
    sign: f64,
    precision: u32,
}

impl Reducer {
    pub fn new(options: &TimerOptions) -> Self {
        Self {
            start_value: options.start_value,
            end_value: options.end_value,
            sign: options.sign(),
            precision: options.precision,
        }
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    /// Seed snapshot for a subscription that starts from `state`
    pub fn initial(&self, state: TimerState, now: Instant) -> Snapshot {
        Snapshot::initial(state, self.start_value, now)
    }

    pub fn reduce(&self, previous: &Snapshot, marker: TimerState, now: Instant) -> Step {
        match marker {
            TimerState::Finish => Step {
                snapshot: Snapshot {
                    value: 0.0,
                    start_date: now,
                    current_date: now,
                    state: TimerState::Finish,
                },
                effect: Some(Effect::Finish),
            },
            TimerState::Stop => Step::quiet(Snapshot {
                value: self.start_value,
                start_date: now,
                current_date: now,
                state: TimerState::Stop,
            }),
            TimerState::Pause => Step::quiet(Snapshot {
                value: self.value_at(previous.start_date, now),
                start_date: previous.start_date,
                current_date: now,
                state: TimerState::Pause,
            }),
            TimerState::Run => {
                let start_date = match previous.state {
                    // Shift the segment start by the time spent paused
                    TimerState::Pause => {
                        previous.start_date + now.saturating_duration_since(previous.current_date)
                    }
                    TimerState::Stop | TimerState::Finish => now,
                    TimerState::Run => previous.start_date,
                };
                let value = self.value_at(start_date, now);

                Step {
                    snapshot: Snapshot {
                        value,
                        start_date,
                        current_date: now,
                        state: TimerState::Run,
                    },
                    effect: Some(Effect::Tick(value)),
                }
            }
        }
    }

    /// Value after counting from `start_date` until `now`, clamped at the end value
    fn value_at(&self, start_date: Instant, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(start_date).as_secs_f64();
        let value = self.start_value + self.sign * round_to_precision(elapsed, self.precision);
        self.clamp(value)
    }

    fn clamp(&self, value: f64) -> f64 {
        let overshot = if self.sign > 0.0 {
            value > self.end_value
        } else {
            value < self.end_value
        };
        if overshot { self.end_value } else { value }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{engine::CommandSource, state::Command};

    fn countdown() -> Reducer {
        let commands = CommandSource::new(Command::Stop);
        Reducer::new(&TimerOptions::new(commands, 10.0, 0.0, Duration::from_millis(33), 2))
    }

    fn count_up() -> Reducer {
        let commands = CommandSource::new(Command::Stop);
        Reducer::new(&TimerOptions::new(commands, 0.0, 5.0, Duration::from_millis(100), 1))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn run_from_stop_starts_a_fresh_segment() {
        let reducer = countdown();
        let t0 = Instant::now();
        let seed = reducer.initial(TimerState::Stop, t0);

        let step = reducer.reduce(&seed, TimerState::Run, t0 + ms(500));
        assert_eq!(step.snapshot.state, TimerState::Run);
        assert_eq!(step.snapshot.start_date, t0 + ms(500));
        assert_eq!(step.snapshot.value, 10.0);
        assert_eq!(step.effect, Some(Effect::Tick(10.0)));

        let step = reducer.reduce(&step.snapshot, TimerState::Run, t0 + ms(1500));
        assert_eq!(step.snapshot.start_date, t0 + ms(500));
        assert_eq!(step.snapshot.value, 9.0);
    }

    #[test]
    fn pause_freezes_and_run_resumes_elapsed_time() {
        let reducer = countdown();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);

        let paused = reducer.reduce(&running.snapshot, TimerState::Pause, t0 + ms(2000)).snapshot;
        assert_eq!(paused.state, TimerState::Pause);
        assert_eq!(paused.value, 8.0);
        assert_eq!(paused.start_date, t0);

        // Five seconds paused, then one more second of running
        let resumed = reducer.reduce(&paused, TimerState::Run, t0 + ms(7000)).snapshot;
        assert_eq!(resumed.start_date, t0 + ms(5000));
        assert_eq!(resumed.value, 8.0);

        let later = reducer.reduce(&resumed, TimerState::Run, t0 + ms(8000)).snapshot;
        assert_eq!(later.value, 7.0);
        assert!(later.start_date <= later.current_date);
    }

    #[test]
    fn stop_resets_to_start_value_from_any_state() {
        let reducer = countdown();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);
        let paused = reducer.reduce(&running.snapshot, TimerState::Pause, t0 + ms(3000));
        let finished = reducer.reduce(&paused.snapshot, TimerState::Finish, t0 + ms(3100));

        for previous in [running.snapshot, paused.snapshot, finished.snapshot] {
            let step = reducer.reduce(&previous, TimerState::Stop, t0 + ms(4000));
            assert_eq!(step.snapshot.state, TimerState::Stop);
            assert_eq!(step.snapshot.value, 10.0);
            assert_eq!(step.snapshot.start_date, t0 + ms(4000));
            assert_eq!(step.effect, None);
        }
    }

    #[test]
    fn run_clamps_at_end_value() {
        let reducer = countdown();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);

        let step = reducer.reduce(&running.snapshot, TimerState::Run, t0 + ms(10_040));
        assert_eq!(step.snapshot.value, 0.0);
        assert_eq!(step.effect, Some(Effect::Tick(0.0)));

        let reducer = count_up();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);
        let step = reducer.reduce(&running.snapshot, TimerState::Run, t0 + ms(7_000));
        assert_eq!(step.snapshot.value, 5.0);
    }

    #[test]
    fn pause_past_the_end_is_clamped() {
        let reducer = count_up();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);

        let paused = reducer.reduce(&running.snapshot, TimerState::Pause, t0 + ms(6_000));
        assert_eq!(paused.snapshot.value, 5.0);
    }

    #[test]
    fn finish_forces_zero_and_requests_callback() {
        let reducer = count_up();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);

        let step = reducer.reduce(&running.snapshot, TimerState::Finish, t0 + ms(5_000));
        assert_eq!(step.snapshot.state, TimerState::Finish);
        assert_eq!(step.snapshot.value, 0.0);
        assert_eq!(step.effect, Some(Effect::Finish));
    }

    #[test]
    fn run_after_finish_starts_over() {
        let reducer = countdown();
        let t0 = Instant::now();
        let finished = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Finish, t0);

        let step = reducer.reduce(&finished.snapshot, TimerState::Run, t0 + ms(1_000));
        assert_eq!(step.snapshot.value, 10.0);
        assert_eq!(step.snapshot.start_date, t0 + ms(1_000));
    }

    #[test]
    fn pause_after_stop_measures_from_the_stop() {
        let reducer = countdown();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);
        let stopped = reducer.reduce(&running.snapshot, TimerState::Stop, t0 + ms(4_000));

        let paused = reducer.reduce(&stopped.snapshot, TimerState::Pause, t0 + ms(4_250));
        assert_eq!(paused.snapshot.start_date, t0 + ms(4_000));
        assert_eq!(paused.snapshot.value, 9.75);
    }

    #[test]
    fn elapsed_time_is_rounded_to_precision() {
        let reducer = countdown();
        let t0 = Instant::now();
        let running = reducer.reduce(&reducer.initial(TimerState::Stop, t0), TimerState::Run, t0);

        let step = reducer.reduce(&running.snapshot, TimerState::Run, t0 + ms(1_023));
        assert_eq!(step.snapshot.value, 10.0 - 1.02);
    }
}
