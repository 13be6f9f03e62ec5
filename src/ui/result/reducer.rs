//! Reducer for the result state machine.

use crate::model::TaskStatus;
use crate::ui::mvi::Reducer;

use super::intent::ResultIntent;
use super::state::{ResultState, UNKNOWN_FAILURE};

/// Pure transition function for [`ResultState`].
///
/// Terminal states only leave through `Reset`. Poll intents are applied only
/// while processing and only when they name the tracked task; anything else
/// is a stale or post-terminal event and leaves the state untouched.
pub struct ResultReducer;

impl Reducer for ResultReducer {
    type State = ResultState;
    type Intent = ResultIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResultIntent::Submitted { task } => match state {
                ResultState::Idle | ResultState::Processing { .. } => ResultState::Processing {
                    task,
                    checks: 0,
                    animation_tick: 0,
                },
                terminal => terminal,
            },

            ResultIntent::SubmitFailed { reason, detail } => match state {
                ResultState::Idle | ResultState::Processing { .. } => ResultState::Failed {
                    task: None,
                    reason,
                    detail,
                },
                terminal => terminal,
            },

            ResultIntent::PollSucceeded { task, result } => match state {
                ResultState::Processing {
                    task: current,
                    checks,
                    animation_tick,
                } if current == task => match result.status() {
                    TaskStatus::Processing => ResultState::Processing {
                        task: current,
                        checks: checks.saturating_add(1),
                        animation_tick,
                    },
                    TaskStatus::Completed => ResultState::Completed {
                        task: current,
                        result,
                    },
                    TaskStatus::Failed => ResultState::Failed {
                        task: Some(current),
                        reason: result.error().unwrap_or(UNKNOWN_FAILURE).to_string(),
                        detail: None,
                    },
                },
                other => other,
            },

            ResultIntent::PollFailed {
                task,
                reason,
                detail,
            } => match state {
                ResultState::Processing { task: current, .. } if current == task => {
                    ResultState::Failed {
                        task: Some(current),
                        reason,
                        detail,
                    }
                }
                other => other,
            },

            ResultIntent::AnimationTick => match state {
                ResultState::Processing {
                    task,
                    checks,
                    animation_tick,
                } => ResultState::Processing {
                    task,
                    checks,
                    animation_tick: animation_tick.wrapping_add(1),
                },
                other => other,
            },

            ResultIntent::Reset => ResultState::Idle,
        }
    }
}
