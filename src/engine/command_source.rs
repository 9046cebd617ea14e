//! Push-based command stream with a current value

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::debug;

use super::CommandError;
use crate::state::Command;

/// Capacity of the command channel before slow subscriptions start lagging
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Externally driven command stream shared by a caller and its timers
///
/// Every subscription starts from the current command and then sees every
/// command sent after it, in order.
#[derive(Debug, Clone)]
pub struct CommandSource {
    current: Arc<Mutex<Command>>,
    tx: broadcast::Sender<Command>,
}

impl CommandSource {
    /// Create a command source whose current value is `initial`
    pub fn new(initial: Command) -> Self {
        let (tx, _) = broadcast::channel(COMMAND_CHANNEL_CAPACITY);
        Self {
            current: Arc::new(Mutex::new(initial)),
            tx,
        }
    }

    /// Push a command to every subscribed timer
    pub fn send(&self, command: Command) -> Result<(), CommandError> {
        let mut current = self.lock();
        *current = command;

        match self.tx.send(command) {
            Ok(receivers) => {
                debug!("Command {} delivered to {} subscription(s)", command, receivers);
                Ok(())
            }
            Err(_) => Err(CommandError::NoSubscribers(command)),
        }
    }

    /// Last command sent, or the initial one
    pub fn current(&self) -> Command {
        *self.lock()
    }

    /// Number of timers currently listening
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Current command together with a receiver for everything after it
    pub(crate) fn subscribe(&self) -> (Command, broadcast::Receiver<Command>) {
        // Holding the lock keeps `send` from slipping in between the two reads
        let current = self.lock();
        (*current, self.tx.subscribe())
    }

    fn lock(&self) -> MutexGuard<'_, Command> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_without_subscribers_still_updates_current() {
        let source = CommandSource::new(Command::Stop);
        let err = source.send(Command::Run).unwrap_err();

        assert_eq!(err, CommandError::NoSubscribers(Command::Run));
        assert_eq!(source.current(), Command::Run);
    }

    #[tokio::test]
    async fn subscription_starts_from_current_and_sees_later_commands() {
        let source = CommandSource::new(Command::Stop);
        source.send(Command::Pause).unwrap_err();

        let (initial, mut rx) = source.subscribe();
        assert_eq!(initial, Command::Pause);
        assert_eq!(source.subscriber_count(), 1);

        source.send(Command::Run).unwrap();
        source.send(Command::Stop).unwrap();
        assert_eq!(rx.recv().await.unwrap(), Command::Run);
        assert_eq!(rx.recv().await.unwrap(), Command::Stop);
    }

    #[test]
    fn clones_share_the_same_stream() {
        let source = CommandSource::new(Command::Stop);
        let (_, _rx) = source.subscribe();

        let other = source.clone();
        other.send(Command::Run).unwrap();
        assert_eq!(source.current(), Command::Run);
        assert_eq!(other.subscriber_count(), 1);
    }
}
