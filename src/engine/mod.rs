//! Timer engine
//!
//! Commands flow through a normalizer and a tick source into a pure reducer.
//! A completion watcher feeds `Finish` back into the command queue, and every
//! reduced snapshot is projected to a rounded public view for the subscriber.

pub mod callbacks;
pub mod command_source;
pub mod completion;
pub mod error;
pub mod normalizer;
pub mod options;
pub mod projector;
pub mod reducer;
pub mod tick_source;
pub mod timer;

// Re-export main types
pub use command_source::CommandSource;
pub use error::{CommandError, TimerError};
pub use options::{FinishCallback, TickCallback, TimerOptions};
pub use projector::{project, round_to_precision};
pub use timer::{SnapshotStream, Timer};
