//! Domain types for generation jobs.
//!
//! These are the validated, client-side view of a job. Wire shapes live in
//! `client::wire` and are converted into these types only after the
//! response invariants have been checked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`GenerationRequest`] locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("topic must not be empty")]
    EmptyTopic,
}

/// Target length of the generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationTarget {
    #[default]
    Short,
    Medium,
    Long,
}

impl DurationTarget {
    pub const ALL: [DurationTarget; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Label sent to the service and shown in the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short (< 1 min)",
            Self::Medium => "Medium (4-6 min)",
            Self::Long => "Long (8+ min)",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl FromStr for DurationTarget {
    type Err = String;

    /// Accepts either the short name (`short`) or the full label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| {
                d.label().eq_ignore_ascii_case(needle)
                    || format!("{:?}", d).eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown duration '{}' (expected short, medium or long)", s))
    }
}

impl fmt::Display for DurationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Motivational,
    Educational,
    Funny,
    Serious,
}

impl Mood {
    pub const ALL: [Mood; 4] = [
        Self::Motivational,
        Self::Educational,
        Self::Funny,
        Self::Serious,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Motivational => "Motivational",
            Self::Educational => "Educational",
            Self::Funny => "Funny",
            Self::Serious => "Serious",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                format!(
                    "unknown mood '{}' (expected motivational, educational, funny or serious)",
                    s
                )
            })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(index + step) % all.len()]
}

/// A job description. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    duration_target: DurationTarget,
    mood: Mood,
}

impl GenerationRequest {
    pub fn new(
        topic: impl Into<String>,
        duration_target: DurationTarget,
        mood: Mood,
    ) -> Result<Self, RequestError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        Ok(Self {
            topic,
            duration_target,
            mood,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn duration_target(&self) -> DurationTarget {
        self.duration_target
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }
}

/// Opaque task identifier assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self(task_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Parse a wire status. `pending` is the service's pre-start status and
    /// counts as processing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "processing" | "pending" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One narrated unit of a generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Stable render key; positive and unique within its preview.
    pub id: u32,
    pub narration: String,
    pub visual_prompt: String,
    pub chapter: Option<String>,
}

/// Script preview attached to a completed task. Scene order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewData {
    pub title: String,
    pub scenes: Vec<Scene>,
}

/// A validated status snapshot.
///
/// Constructors enforce the shape invariants: a download URL and preview
/// only exist on completed results, an error only on failed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    status: TaskStatus,
    download_url: Option<String>,
    error: Option<String>,
    preview: Option<PreviewData>,
    file_path: Option<String>,
}

impl TaskResult {
    pub fn processing() -> Self {
        Self {
            status: TaskStatus::Processing,
            download_url: None,
            error: None,
            preview: None,
            file_path: None,
        }
    }

    pub fn completed(download_url: Option<String>, preview: Option<PreviewData>) -> Self {
        Self {
            status: TaskStatus::Completed,
            download_url,
            error: None,
            preview,
            file_path: None,
        }
    }

    pub fn failed(error: Option<String>) -> Self {
        Self {
            status: TaskStatus::Failed,
            download_url: None,
            error,
            preview: None,
            file_path: None,
        }
    }

    /// Attach the server-side asset directory reported by the service.
    pub fn with_file_path(mut self, file_path: Option<String>) -> Self {
        self.file_path = file_path;
        self
    }

    pub(crate) fn map_download_url(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.download_url = self.download_url.map(f);
        self
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Preview data; `None` unless the task completed.
    pub fn preview(&self) -> Option<&PreviewData> {
        self.preview.as_ref()
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}
