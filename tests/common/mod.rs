//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_service;

use antiflow::client::GenerationClient;
use antiflow::config::ServiceConfig;
use antiflow::session::GenerationSession;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub use mock_service::{CapturedRequest, MockResponse, MockService};

/// Poll interval used by session tests against the mock service.
pub const TEST_INTERVAL: Duration = Duration::from_millis(20);

pub fn service_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

pub fn client_for(service: &MockService) -> GenerationClient {
    GenerationClient::new(&service_config(&service.base_url())).expect("client")
}

pub fn session_for(service: &MockService) -> GenerationSession<GenerationClient> {
    GenerationSession::new(Arc::new(client_for(service)), TEST_INTERVAL)
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Accepted-job body for `POST /generate`.
pub fn accepted(task_id: &str) -> MockResponse {
    MockResponse::json(&format!(
        r#"{{"task_id": "{}", "status": "processing"}}"#,
        task_id
    ))
}

pub fn processing() -> MockResponse {
    MockResponse::json(r#"{"status": "processing"}"#)
}

pub fn result_path(task_id: &str) -> String {
    format!("/api/v1/result/{}", task_id)
}

pub const GENERATE_PATH: &str = "/api/v1/generate";
