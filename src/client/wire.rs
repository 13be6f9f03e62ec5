//! JSON shapes exchanged with the generation service.
//!
//! Responses are deserialized leniently (status as a raw string, optional
//! fields) and then validated into domain types. Validation failures are
//! reported as reasons and never coerced into a "close enough" result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{GenerationRequest, PreviewData, Scene, TaskHandle, TaskResult, TaskStatus};

/// Body of `POST /generate`.
#[derive(Debug, Serialize)]
pub struct GenerateBody<'a> {
    pub topic: &'a str,
    pub duration_target: &'a str,
    pub mood: &'a str,
}

impl<'a> From<&'a GenerationRequest> for GenerateBody<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            topic: request.topic(),
            duration_target: request.duration_target().label(),
            mood: request.mood().label(),
        }
    }
}

/// Response of `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateResponse {
    pub fn validate(self) -> Result<(TaskHandle, TaskStatus), String> {
        let task_id = match self.task_id {
            Some(id) if !id.trim().is_empty() => id,
            Some(_) => return Err("empty task_id".to_string()),
            None => return Err("missing task_id".to_string()),
        };
        let status = parse_status(self.status.as_deref())?;
        Ok((TaskHandle::new(task_id), status))
    }
}

/// Response of `GET /result/{task_id}`.
#[derive(Debug, Deserialize)]
pub struct ResultResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub preview_data: Option<PreviewBody>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewBody {
    pub title: String,
    pub scenes: Vec<SceneBody>,
}

#[derive(Debug, Deserialize)]
pub struct SceneBody {
    pub id: i64,
    pub narration: String,
    pub visual_prompt: String,
    #[serde(default)]
    pub chapter: Option<String>,
}

impl ResultResponse {
    pub fn validate(self) -> Result<TaskResult, String> {
        let status = parse_status(self.status.as_deref())?;

        if status != TaskStatus::Completed {
            if self.preview_data.is_some() {
                return Err(format!("preview_data present with status '{}'", status));
            }
            if self.download_url.is_some() {
                return Err(format!("download_url present with status '{}'", status));
            }
        }
        if status != TaskStatus::Failed && self.error.is_some() {
            return Err(format!("error present with status '{}'", status));
        }

        let result = match status {
            TaskStatus::Processing => TaskResult::processing(),
            TaskStatus::Completed => {
                let preview = self.preview_data.map(PreviewBody::validate).transpose()?;
                TaskResult::completed(self.download_url, preview)
            }
            TaskStatus::Failed => TaskResult::failed(self.error),
        };
        Ok(result.with_file_path(self.file_path))
    }
}

impl PreviewBody {
    fn validate(self) -> Result<PreviewData, String> {
        let mut seen = HashSet::with_capacity(self.scenes.len());
        let mut scenes = Vec::with_capacity(self.scenes.len());

        for scene in self.scenes {
            let id = u32::try_from(scene.id)
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| format!("scene id {} is not a positive integer", scene.id))?;
            if !seen.insert(id) {
                return Err(format!("duplicate scene id {}", id));
            }
            scenes.push(Scene {
                id,
                narration: scene.narration,
                visual_prompt: scene.visual_prompt,
                chapter: scene.chapter,
            });
        }

        Ok(PreviewData {
            title: self.title,
            scenes,
        })
    }
}

fn parse_status(raw: Option<&str>) -> Result<TaskStatus, String> {
    let raw = raw.ok_or_else(|| "missing status".to_string())?;
    TaskStatus::parse(raw).ok_or_else(|| format!("unrecognized status '{}'", raw))
}
