//! Tests for the binary's command-line surface.

mod common;

use std::process::{Command, Output};

use common::*;

fn antiflow_cmd(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_antiflow"));
    cmd.env_remove("ANTIFLOW_BASE_URL")
        .env_remove("ANTIFLOW_LOG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_dir.path().join("config.toml"));
    cmd
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{}/api/v1", port)
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = antiflow_cmd(&dir)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("watch"));
    assert!(stdout.contains("--base-url"));
}

#[test]
fn test_invalid_duration_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = antiflow_cmd(&dir)
        .args(["generate", "--topic", "Rust", "--duration", "forever"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_topic_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = antiflow_cmd(&dir)
        .arg("generate")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--topic"));
}

#[test]
fn test_invalid_base_url_fails_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = antiflow_cmd(&dir)
        .args(["--base-url", "ftp://example.com", "watch", "abc"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}

#[test]
fn test_unreachable_service_fails_generate() {
    let dir = tempfile::tempdir().unwrap();
    let output = antiflow_cmd(&dir)
        .args(["--base-url", &closed_port_url(), "generate", "--topic", "Rust"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed to start generation"), "stdout: {}", stdout);
}

async fn run_blocking(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute command"))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_runs_to_completion() {
    let service = MockService::start().await;
    service.enqueue(GENERATE_PATH, accepted("abc123")).await;
    service.enqueue(&result_path("abc123"), processing()).await;
    service
        .enqueue(
            &result_path("abc123"),
            MockResponse::json(
                r#"{"status": "completed", "download_url": "https://x/y.zip",
                    "preview_data": {"title": "T", "scenes": [{"id": 1, "narration": "N1", "visual_prompt": "V1"}]}}"#,
            ),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = antiflow_cmd(&dir);
    cmd.args([
        "--base-url",
        &service.base_url(),
        "--interval-ms",
        "20",
        "generate",
        "--topic",
        "How to stop procrastinating",
        "--mood",
        "serious",
    ]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generating Assets... task=abc123"));
    assert!(stdout.contains("Generation Complete!"));
    assert!(stdout.contains("https://x/y.zip"));
    assert!(stdout.contains("Scene 1"));

    let requests = service.captured_requests().await;
    assert_eq!(requests[0].json()["mood"], "Serious");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_failed_task_exits_one() {
    let service = MockService::start().await;
    service
        .enqueue(
            &result_path("t9"),
            MockResponse::json(r#"{"status": "failed", "error": "Audio generation failed"}"#),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = antiflow_cmd(&dir);
    cmd.args(["--base-url", &service.base_url(), "watch", "t9"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Audio generation failed"));
}
