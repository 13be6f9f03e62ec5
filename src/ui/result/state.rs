//! State of the tracked generation task.

use crate::model::{TaskHandle, TaskResult};
use crate::ui::mvi::UiState;

/// Reason shown when the service reports a failure without error text.
pub const UNKNOWN_FAILURE: &str = "Unknown error occurred";

/// Lifecycle of the tracked task, as seen by the views.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultState {
    /// No task; the submission form is shown.
    #[default]
    Idle,

    /// Task submitted, status checks running.
    Processing {
        task: TaskHandle,
        /// Number of non-terminal status responses seen so far.
        checks: u32,
        /// Animation tick for the spinner.
        animation_tick: u8,
    },

    /// Terminal: the service finished the job.
    Completed { task: TaskHandle, result: TaskResult },

    /// Terminal: the job failed or could not be tracked.
    Failed {
        /// `None` when the submission itself failed.
        task: Option<TaskHandle>,
        reason: String,
        detail: Option<String>,
    },
}

impl UiState for ResultState {}

impl ResultState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// Completed or Failed; only a reset leaves these.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }

    /// Task the state is tied to, if any.
    pub fn task(&self) -> Option<&TaskHandle> {
        match self {
            Self::Idle => None,
            Self::Processing { task, .. } | Self::Completed { task, .. } => Some(task),
            Self::Failed { task, .. } => task.as_ref(),
        }
    }

    /// Final result, present only once completed.
    pub fn result(&self) -> Option<&TaskResult> {
        match self {
            Self::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn checks(&self) -> u32 {
        match self {
            Self::Processing { checks, .. } => *checks,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_default() {
        assert_eq!(ResultState::default(), ResultState::Idle);
    }

    #[test]
    fn terminal_check() {
        let task = TaskHandle::new("t");
        assert!(!ResultState::Idle.is_terminal());
        assert!(!ResultState::Processing {
            task: task.clone(),
            checks: 0,
            animation_tick: 0,
        }
        .is_terminal());
        assert!(ResultState::Completed {
            task,
            result: TaskResult::completed(None, None),
        }
        .is_terminal());
        assert!(ResultState::Failed {
            task: None,
            reason: "x".into(),
            detail: None,
        }
        .is_terminal());
    }

    #[test]
    fn submission_failure_has_no_task() {
        let state = ResultState::Failed {
            task: None,
            reason: "Failed to start generation".into(),
            detail: None,
        };
        assert_eq!(state.task(), None);
        assert_eq!(state.error_message(), Some("Failed to start generation"));
        assert!(state.result().is_none());
    }
}
