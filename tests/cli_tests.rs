//! End-to-end tests for the `shelflife` binary.

use std::process::Stdio;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

fn shelflife() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shelflife"));
    cmd.env_remove("API_BASE_URL")
        .env_remove("API_AUTH_TOKEN")
        .env_remove("API_AUTH_HEADER")
        .env_remove("API_MODEL")
        .env_remove("API_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        // Keep dotenvy away from any .env in the source tree.
        .current_dir(std::env::temp_dir())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

async fn spawn_stub(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)).into_response() }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    format!("http://{addr}/v1")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prints_answer_for_argument() {
    let output = shelflife()
        .args(["--mock-reply", " 2025-05-01 ", "milk"])
        .output()
        .await
        .expect("Failed to run shelflife");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Expiry Date: 2025-05-01\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_labels_each_item_when_several_are_given() {
    let output = shelflife()
        .args(["--mock-reply", "2025-05-01", "milk", "eggs"])
        .output()
        .await
        .expect("Failed to run shelflife");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "milk: Expiry Date: 2025-05-01\neggs: Expiry Date: 2025-05-01\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reads_item_from_stdin() {
    let mut child = shelflife()
        .args(["--mock-reply", "2025-05-01"])
        .stdin(Stdio::piped())
        .spawn()
        .expect("Failed to spawn shelflife");

    let mut stdin = child.stdin.take().expect("stdin not piped");
    stdin.write_all(b"milk\n").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Enter the name of the item: Expiry Date: 2025-05-01\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_item_exits_with_invalid_argument() {
    let output = shelflife()
        .args(["--mock-reply", "2025-05-01", "   "])
        .output()
        .await
        .expect("Failed to run shelflife");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid argument"));
    assert!(output.stdout.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_token_exits_with_configuration_error() {
    let output = shelflife()
        .arg("milk")
        .output()
        .await
        .expect("Failed to run shelflife");

    assert_eq!(output.status.code(), Some(78));
    assert!(String::from_utf8_lossy(&output.stderr).contains("API_AUTH_TOKEN"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_failure_exits_non_zero() {
    let base_url = spawn_stub(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"message": "overloaded"}}),
    )
    .await;

    let output = shelflife()
        .env("API_BASE_URL", &base_url)
        .env("API_AUTH_TOKEN", "test-token")
        .arg("milk")
        .output()
        .await
        .expect("Failed to run shelflife");

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("overloaded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_flag_against_live_stub() {
    let base_url = spawn_stub(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "\n2999-01-01\n"}}]}),
    )
    .await;

    let output = shelflife()
        .env("API_BASE_URL", &base_url)
        .env("API_AUTH_TOKEN", "test-token")
        .args(["--status", "milk"])
        .output()
        .await
        .expect("Failed to run shelflife");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Expiry Date: 2999-01-01\nDays Left: "));
    assert!(stdout.trim_end().ends_with("(fresh)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_base_url_exits_with_configuration_error() {
    let output = shelflife()
        .env("API_AUTH_TOKEN", "test-token")
        .args(["--base-url", "localhost:1234/v1", "milk"])
        .output()
        .await
        .expect("Failed to run shelflife");

    assert_eq!(output.status.code(), Some(78));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_timeout_env_exits_with_configuration_error() {
    let output = shelflife()
        .env("API_AUTH_TOKEN", "test-token")
        .env("API_TIMEOUT_SECS", "0")
        .arg("milk")
        .output()
        .await
        .expect("Failed to run shelflife");

    assert_eq!(output.status.code(), Some(78));
    assert!(String::from_utf8_lossy(&output.stderr).contains("API_TIMEOUT_SECS"));
}
