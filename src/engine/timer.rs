//! Timer construction and the per-subscription engine loop

use std::{
    collections::VecDeque,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use futures::Stream;
use tokio::{
    sync::{
        broadcast::{self, error::RecvError, error::TryRecvError},
        mpsc,
    },
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use super::{
    callbacks::CallbackDispatcher,
    completion::CompletionWatcher,
    normalizer::CommandNormalizer,
    projector::project,
    reducer::{Effect, Reducer, Step},
    tick_source::TickSource,
    TimerError, TimerOptions,
};
use crate::state::{Command, Projection, Snapshot, TimerState};

/// A validated timer recipe
///
/// Nothing runs until [`Timer::subscribe`] is called. Every subscription
/// drives its own engine loop from the current command onwards.
#[derive(Debug, Clone)]
pub struct Timer {
    options: TimerOptions,
}

impl Timer {
    /// Validate `options` and build the timer
    pub fn new(options: TimerOptions) -> Result<Self, TimerError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &TimerOptions {
        &self.options
    }

    /// Start an engine loop and return its projections
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self) -> SnapshotStream {
        let (initial, commands) = self.options.commands.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();

        let engine = Engine::new(&self.options, commands, tx);
        let handle = tokio::spawn(engine.run(initial));

        SnapshotStream { rx, engine: handle }
    }
}

/// Live stream of [`Projection`]s for one subscription
///
/// Dropping the stream stops the engine loop behind it.
#[derive(Debug)]
pub struct SnapshotStream {
    rx: mpsc::UnboundedReceiver<Projection>,
    engine: JoinHandle<()>,
}

impl Stream for SnapshotStream {
    type Item = Projection;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Projection>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for SnapshotStream {
    fn drop(&mut self) {
        self.engine.abort();
    }
}

/// Who put a command into the engine queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    External,
    /// Re-injected by the completion watcher
    Feedback,
}

#[derive(Debug, Clone, Copy)]
struct Queued {
    command: TimerState,
    origin: Origin,
}

/// State owned by one subscription's loop
struct Engine {
    reducer: Reducer,
    watcher: CompletionWatcher,
    normalizer: CommandNormalizer,
    ticks: TickSource,
    callbacks: CallbackDispatcher,
    period: Duration,
    precision: u32,
    commands: broadcast::Receiver<Command>,
    commands_open: bool,
    queue: VecDeque<Queued>,
    snapshots: mpsc::UnboundedSender<Projection>,
}

impl Engine {
    fn new(
        options: &TimerOptions,
        commands: broadcast::Receiver<Command>,
        snapshots: mpsc::UnboundedSender<Projection>,
    ) -> Self {
        Self {
            reducer: Reducer::new(options),
            watcher: CompletionWatcher::new(options.end_value),
            normalizer: CommandNormalizer::new(),
            ticks: TickSource::Idle,
            callbacks: CallbackDispatcher::spawn(options.on_tick.clone(), options.on_finish.clone()),
            period: options.interval,
            precision: options.precision,
            commands,
            commands_open: true,
            queue: VecDeque::new(),
            snapshots,
        }
    }

    async fn run(mut self, initial: Command) {
        info!(
            "Timer subscribed: {} -> {} every {:?}, starting from {}",
            self.reducer.start_value(),
            self.reducer.end_value(),
            self.period,
            initial
        );

        let mut snapshot = self.reducer.initial(initial.into(), Instant::now());
        self.enqueue(initial.into(), Origin::External);

        loop {
            snapshot = match self.apply_queued(snapshot).await {
                Some(next) => next,
                None => return self.unsubscribed(),
            };

            let marker = tokio::select! {
                biased;

                _ = self.snapshots.closed() => return self.unsubscribed(),

                received = self.commands.recv(), if self.commands_open => {
                    self.receive(received);
                    continue;
                }

                marker = self.ticks.next() => marker,
            };

            match self.step(&snapshot, marker) {
                Some(next) => snapshot = next,
                None => return self.unsubscribed(),
            }
        }
    }

    /// Apply every queued command in order
    ///
    /// Returns `None` once the subscriber is gone.
    async fn apply_queued(&mut self, mut snapshot: Snapshot) -> Option<Snapshot> {
        while let Some(queued) = self.queue.pop_front() {
            if queued.origin == Origin::Feedback {
                // Never finish inside the step that reached the end
                tokio::task::yield_now().await;

                // A command queued ahead of the finish may have left the end value
                if !self.watcher.reached_end(&snapshot) {
                    debug!("Dropping finish, timer is now {} at {}", snapshot.state, snapshot.value);
                    continue;
                }
            }
            snapshot = self.apply_command(&snapshot, queued)?;
        }
        Some(snapshot)
    }

    /// Normalize a queued command and switch the tick source for it
    ///
    /// Returns `None` once the subscriber is gone.
    fn apply_command(&mut self, snapshot: &Snapshot, queued: Queued) -> Option<Snapshot> {
        if !self.normalizer.admit(queued.command) {
            debug!("Ignoring repeated {} command", queued.command);
            return Some(*snapshot);
        }

        match queued.origin {
            Origin::External => debug!("Applying {} command", queued.command),
            Origin::Feedback => info!("End value reached, finishing timer"),
        }

        match self.ticks.switch(queued.command, self.period) {
            Some(marker) => self.step(snapshot, marker),
            None => {
                self.callbacks.dispatch(Effect::Tick(self.reducer.start_value()));
                Some(*snapshot)
            }
        }
    }

    /// Reduce one marker, watch for completion and publish the projection
    fn step(&mut self, previous: &Snapshot, marker: TimerState) -> Option<Snapshot> {
        let Step { snapshot, effect } = self.reducer.reduce(previous, marker, Instant::now());

        if let Some(effect) = effect {
            self.callbacks.dispatch(effect);
        }

        if self.watcher.reached_end(&snapshot) {
            // Commands that already arrived stay ahead of the finish
            self.drain_commands();
            self.enqueue(TimerState::Finish, Origin::Feedback);
        }

        let projection = project(&snapshot, self.precision);
        if !(marker.is_running() && previous.state.is_running()) {
            debug!("Timer {} at {}", projection.timer_state, projection.value);
        }

        self.snapshots.send(projection).ok()?;
        Some(snapshot)
    }

    fn receive(&mut self, received: Result<Command, RecvError>) {
        match received {
            Ok(command) => self.enqueue(command.into(), Origin::External),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Timer fell behind, {} command(s) were dropped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Command source closed, timer keeps its current course");
                self.commands_open = false;
            }
        }
    }

    fn drain_commands(&mut self) {
        while self.commands_open {
            match self.commands.try_recv() {
                Ok(command) => self.enqueue(command.into(), Origin::External),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Timer fell behind, {} command(s) were dropped", skipped);
                }
                Err(TryRecvError::Closed) => self.commands_open = false,
            }
        }
    }

    fn enqueue(&mut self, command: TimerState, origin: Origin) {
        self.queue.push_back(Queued { command, origin });
    }

    fn unsubscribed(&self) {
        debug!("Timer subscriber went away, stopping engine loop");
    }
}
