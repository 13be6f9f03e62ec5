//! Per-task status polling.
//!
//! A [`TaskPoller`] drives at most one poll run at a time. Every run gets a
//! fresh generation number and every [`PollEvent`] carries it, so a consumer
//! can drop events from a superseded or stopped run with a single comparison.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::{ClientError, StatusSource};
use crate::model::{TaskHandle, TaskResult};

/// Lower bound for the check interval; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Outcome of one status check.
#[derive(Debug)]
pub struct PollEvent {
    /// Run that issued the check.
    pub generation: u64,
    pub handle: TaskHandle,
    pub outcome: Result<TaskResult, ClientError>,
}

impl PollEvent {
    /// True when this event ends the run (terminal status or error).
    pub fn is_final(&self) -> bool {
        match &self.outcome {
            Ok(result) => result.status().is_terminal(),
            Err(_) => true,
        }
    }
}

struct PollRun {
    handle: TaskHandle,
    task: JoinHandle<()>,
}

/// Repeats `fetch_status` for one task on a fixed interval.
///
/// - The first check fires immediately.
/// - Checks never overlap; a slow check pushes the schedule back.
/// - The run ends by itself after a terminal status or an error.
/// - `stop()` aborts the run and invalidates anything it already queued.
pub struct TaskPoller<S: StatusSource + ?Sized> {
    source: Arc<S>,
    interval: Duration,
    generation: Arc<AtomicU64>,
    run: Option<PollRun>,
    events: mpsc::UnboundedSender<PollEvent>,
}

impl<S: StatusSource + ?Sized> TaskPoller<S> {
    /// Create a poller and the receiver its events are delivered on.
    pub fn new(source: Arc<S>, interval: Duration) -> (Self, mpsc::UnboundedReceiver<PollEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let poller = Self {
            source,
            interval: interval.max(MIN_INTERVAL),
            generation: Arc::new(AtomicU64::new(0)),
            run: None,
            events,
        };
        (poller, receiver)
    }

    /// Begin polling `handle`, replacing any current run.
    ///
    /// Must be called from within a tokio runtime. Returns the generation
    /// assigned to the new run.
    pub fn start(&mut self, handle: TaskHandle) -> u64 {
        self.stop();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.source),
            handle.clone(),
            self.interval,
            generation,
            Arc::clone(&self.generation),
            self.events.clone(),
        ));

        tracing::debug!(task_id = %handle, generation, "Polling started");
        self.run = Some(PollRun { handle, task });
        generation
    }

    /// Cancel the current run. Idempotent.
    ///
    /// No further checks are issued, and any event the run already produced
    /// fails [`is_current`](Self::is_current) from here on.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        run.task.abort();
        let retired = self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(task_id = %run.handle, generation = retired, "Polling stopped");
    }

    /// Whether `event` belongs to the run currently tracked.
    pub fn is_current(&self, event: &PollEvent) -> bool {
        match &self.run {
            Some(run) => {
                event.generation == self.generation.load(Ordering::SeqCst)
                    && event.handle == run.handle
            }
            None => false,
        }
    }

    /// Handle of the tracked task, if any.
    pub fn handle(&self) -> Option<&TaskHandle> {
        self.run.as_ref().map(|run| &run.handle)
    }

    /// Whether a run is still scheduled to issue checks.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.task.is_finished())
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<S: StatusSource + ?Sized> Drop for TaskPoller<S> {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.task.abort();
        }
    }
}

async fn poll_loop<S: StatusSource + ?Sized>(
    source: Arc<S>,
    handle: TaskHandle,
    interval: Duration,
    generation: u64,
    current: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<PollEvent>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if current.load(Ordering::SeqCst) != generation {
            break;
        }

        let outcome = source.fetch_status(&handle).await;

        // Superseded while the check was in flight.
        if current.load(Ordering::SeqCst) != generation {
            tracing::debug!(task_id = %handle, generation, "Dropping stale status check");
            break;
        }

        if let Err(err) = &outcome {
            tracing::warn!(task_id = %handle, generation, error = %err, "Status check failed");
        }

        let event = PollEvent {
            generation,
            handle: handle.clone(),
            outcome,
        };
        let done = event.is_final();
        if events.send(event).is_err() || done {
            break;
        }
    }
}
