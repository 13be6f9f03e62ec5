//! Generation session: the single owner of the tracked task and its state.
//!
//! A session wires the client, the [`TaskPoller`] and the pure
//! [`ResultReducer`] together. Front-ends read [`GenerationSession::state`]
//! and call [`GenerationSession::reset`]; nothing else mutates the state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::{ClientError, StatusSource, Submitter};
use crate::model::{GenerationRequest, TaskHandle};
use crate::task::{PollEvent, TaskPoller};
use crate::ui::mvi::Reducer;
use crate::ui::result::{ResultIntent, ResultReducer, ResultState};

pub struct GenerationSession<C: Submitter + StatusSource> {
    client: Arc<C>,
    poller: TaskPoller<C>,
    events: mpsc::UnboundedReceiver<PollEvent>,
    state: ResultState,
}

impl<C: Submitter + StatusSource> GenerationSession<C> {
    pub fn new(client: Arc<C>, interval: Duration) -> Self {
        let (poller, events) = TaskPoller::new(Arc::clone(&client), interval);
        Self {
            client,
            poller,
            events,
            state: ResultState::Idle,
        }
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    /// Task currently tied to the state, if any.
    pub fn handle(&self) -> Option<&TaskHandle> {
        self.state.task()
    }

    /// Whether status checks are still scheduled.
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Submit a new job and start tracking it.
    ///
    /// Any task tracked so far is abandoned first. On failure the state
    /// becomes `Failed` and the error is also returned to the caller.
    pub async fn submit(&mut self, request: &GenerationRequest) -> Result<TaskHandle, ClientError> {
        self.abandon_current();

        match self.client.submit(request).await {
            Ok(submission) => {
                tracing::info!(
                    task_id = %submission.handle,
                    status = %submission.initial_status,
                    "Tracking submitted task"
                );
                self.begin(submission.handle.clone());
                Ok(submission.handle)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Submission failed");
                self.dispatch(ResultIntent::SubmitFailed {
                    reason: err.user_message().to_string(),
                    detail: Some(err.details()),
                });
                Err(err)
            }
        }
    }

    /// Start tracking a task that already exists on the service.
    pub fn track(&mut self, handle: TaskHandle) {
        self.abandon_current();
        tracing::info!(task_id = %handle, "Tracking existing task");
        self.begin(handle);
    }

    /// Wait for the next poll event, current or stale.
    ///
    /// Cancel safe, so it can sit in a `select!` next to input handling.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }

    /// Feed a poll event into the state machine.
    ///
    /// Returns `false` when the event belongs to a stopped or superseded run
    /// and was dropped.
    pub fn apply(&mut self, event: PollEvent) -> bool {
        if !self.poller.is_current(&event) {
            tracing::debug!(
                task_id = %event.handle,
                generation = event.generation,
                "Dropping stale poll event"
            );
            return false;
        }

        let intent = match event.outcome {
            Ok(result) => ResultIntent::PollSucceeded {
                task: event.handle,
                result,
            },
            Err(err) => ResultIntent::PollFailed {
                task: event.handle,
                reason: err.user_message().to_string(),
                detail: Some(err.details()),
            },
        };
        self.dispatch(intent);

        if self.state.is_terminal() {
            self.poller.stop();
            let task_id = self.state.task().map(ToString::to_string).unwrap_or_default();
            match self.state.error_message() {
                Some(reason) => tracing::info!(task_id = %task_id, reason = %reason, "Task failed"),
                None => tracing::info!(task_id = %task_id, "Task completed"),
            }
        }
        true
    }

    /// Apply events until the tracked task reaches a terminal state.
    ///
    /// `observe` sees the state after every applied event.
    pub async fn run_to_completion(&mut self, mut observe: impl FnMut(&ResultState)) -> &ResultState {
        while self.state.is_processing() {
            let Some(event) = self.next_event().await else {
                break;
            };
            if self.apply(event) {
                observe(&self.state);
            }
        }
        &self.state
    }

    /// Stop tracking and return to `Idle`.
    pub fn reset(&mut self) {
        self.poller.stop();
        if let Some(task) = self.state.task() {
            tracing::info!(task_id = %task, "Task discarded");
        }
        self.dispatch(ResultIntent::Reset);
    }

    /// Advance the progress spinner.
    pub fn tick(&mut self) {
        self.dispatch(ResultIntent::AnimationTick);
    }

    fn begin(&mut self, handle: TaskHandle) {
        self.dispatch(ResultIntent::Submitted {
            task: handle.clone(),
        });
        self.poller.start(handle);
    }

    fn abandon_current(&mut self) {
        self.poller.stop();
        if self.state.is_terminal() {
            self.dispatch(ResultIntent::Reset);
        }
    }

    fn dispatch(&mut self, intent: ResultIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = ResultReducer::reduce(state, intent);
    }
}
