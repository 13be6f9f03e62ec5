//! Intents for the result state machine.

use crate::model::{TaskHandle, TaskResult};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ResultIntent {
    /// The service accepted a job (or an existing task id is being tracked).
    Submitted { task: TaskHandle },

    /// The job was not accepted; no task exists.
    SubmitFailed {
        reason: String,
        detail: Option<String>,
    },

    /// A status check for `task` returned.
    PollSucceeded { task: TaskHandle, result: TaskResult },

    /// A status check for `task` failed.
    PollFailed {
        task: TaskHandle,
        reason: String,
        detail: Option<String>,
    },

    /// Spinner animation tick.
    AnimationTick,

    /// User discarded the task and returned to the form.
    Reset,
}

impl Intent for ResultIntent {}
