//! HTTP client for the remote generation service.
//!
//! Two operations are exposed through the [`Submitter`] and [`StatusSource`]
//! traits so the poller and session can be driven by fakes in tests.

pub mod error;
pub mod wire;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::config::ServiceConfig;
use crate::model::{GenerationRequest, TaskHandle, TaskResult, TaskStatus};

pub use error::{ClientError, FailureKind, Operation};
use wire::{GenerateBody, GenerateResponse, ResultResponse};

/// Accepted job as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub handle: TaskHandle,
    /// Status reported alongside the task id; expected to be processing.
    pub initial_status: TaskStatus,
}

/// Submits new generation jobs.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    async fn submit(&self, request: &GenerationRequest) -> Result<Submission, ClientError>;
}

/// Reads the status of an existing job.
///
/// Calls must be side-effect free on local state and safe to repeat.
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<TaskResult, ClientError>;
}

/// reqwest-backed client for `/generate` and `/result/{task_id}`.
pub struct GenerationClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl GenerationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .build()
            .map_err(ClientError::ClientBuild)?;

        Ok(Self {
            client,
            base_url,
            timeout_secs: config.timeout_seconds as u64,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a download link against the service origin.
    ///
    /// The service may hand out links like `/api/v1/download/{id}`; those are
    /// made absolute so the link is usable outside this process.
    pub fn resolve_download_url(&self, raw: String) -> String {
        if Url::parse(&raw).is_ok() {
            return raw;
        }
        match self.base_url.join(&raw) {
            Ok(url) => url.to_string(),
            Err(_) => raw,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_body(&self, response: Response, operation: Operation) -> Result<String, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ClientError::Status {
                operation,
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::transport(operation, e, self.timeout_secs))
    }
}

#[async_trait]
impl Submitter for GenerationClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<Submission, ClientError> {
        let operation = Operation::Submit;
        let url = self.endpoint(&["generate"])?;

        tracing::debug!(
            url = %url,
            topic = %request.topic(),
            duration = %request.duration_target(),
            mood = %request.mood(),
            "Submitting generation request"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .json(&GenerateBody::from(request))
            .send()
            .await
            .map_err(|e| ClientError::transport(operation, e, self.timeout_secs))?;

        let body = self.read_body(response, operation).await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::malformed(operation, e.to_string()))?;
        let (handle, initial_status) = parsed
            .validate()
            .map_err(|reason| ClientError::malformed(operation, reason))?;

        tracing::info!(
            task_id = %handle,
            status = %initial_status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generation task created"
        );

        Ok(Submission {
            handle,
            initial_status,
        })
    }
}

#[async_trait]
impl StatusSource for GenerationClient {
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<TaskResult, ClientError> {
        let operation = Operation::FetchStatus;
        let url = self.endpoint(&["result", handle.as_str()])?;

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::transport(operation, e, self.timeout_secs))?;

        let body = self.read_body(response, operation).await?;
        let parsed: ResultResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::malformed(operation, e.to_string()))?;
        let result = parsed
            .validate()
            .map_err(|reason| ClientError::malformed(operation, reason))?
            .map_download_url(|raw| self.resolve_download_url(raw));

        tracing::debug!(
            task_id = %handle,
            status = %result.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Status checked"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GenerationClient {
        GenerationClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            ..ServiceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let client = client("http://127.0.0.1:8000/api/v1/");
        let url = client.endpoint(&["result", "abc123"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/result/abc123");
    }

    #[test]
    fn endpoint_encodes_task_id_as_one_segment() {
        let client = client("http://127.0.0.1:8000/api/v1");
        let url = client.endpoint(&["result", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/result/a%2Fb%20c");
    }

    #[test]
    fn relative_download_url_is_resolved_against_origin() {
        let client = client("http://127.0.0.1:8000/api/v1");
        assert_eq!(
            client.resolve_download_url("/api/v1/download/abc".to_string()),
            "http://127.0.0.1:8000/api/v1/download/abc"
        );
        assert_eq!(
            client.resolve_download_url("https://x/y.zip".to_string()),
            "https://x/y.zip"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = GenerationClient::new(&ServiceConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..ServiceConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
