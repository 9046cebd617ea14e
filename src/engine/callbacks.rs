//! Fire-and-forget callback delivery

use std::panic::{self, AssertUnwindSafe};

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::{reducer::Effect, FinishCallback, TickCallback};

/// Runs user callbacks on a separate task the engine never waits for
///
/// Effects are delivered at most once and in the order they were dispatched.
/// A panicking callback is logged and does not stop later deliveries.
#[derive(Debug)]
pub struct CallbackDispatcher {
    tx: Option<mpsc::UnboundedSender<Effect>>,
}

impl CallbackDispatcher {
    /// Spawn the delivery task, unless there is nothing to call
    pub fn spawn(on_tick: Option<TickCallback>, on_finish: Option<FinishCallback>) -> Self {
        if on_tick.is_none() && on_finish.is_none() {
            return Self { tx: None };
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<Effect>();
        tokio::spawn(async move {
            while let Some(effect) = rx.recv().await {
                let outcome = match effect {
                    Effect::Tick(value) => match &on_tick {
                        Some(callback) => panic::catch_unwind(AssertUnwindSafe(|| callback(value))),
                        None => Ok(()),
                    },
                    Effect::Finish => match &on_finish {
                        Some(callback) => panic::catch_unwind(AssertUnwindSafe(|| callback())),
                        None => Ok(()),
                    },
                };

                if outcome.is_err() {
                    error!("Timer callback panicked while handling {:?}", effect);
                }
            }
            debug!("Callback dispatcher stopped");
        });

        Self { tx: Some(tx) }
    }

    /// Queue an effect without waiting for it to run
    pub fn dispatch(&self, effect: Effect) {
        if let Some(tx) = &self.tx {
            if tx.send(effect).is_err() {
                warn!("Callback dispatcher is gone, dropping {:?}", effect);
            }
        }
    }
}
