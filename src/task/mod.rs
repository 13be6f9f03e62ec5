//! Task lifecycle scheduling.

mod poller;

pub use poller::{PollEvent, TaskPoller};
