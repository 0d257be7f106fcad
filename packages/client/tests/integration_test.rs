//! Integration test for the focus pipeline using a process-based server.
//!
//! Spawns the real server binary, starts a session over the HTTP API, drives
//! raw WebSocket clients through the wire protocol, and checks the
//! distraction alert, the classroom snapshot and the persisted focus log.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

const TEST_PORT: u16 = 9377;

/// Helper struct to manage server process lifecycle
struct TestServer {
    process: Child,
    port: u16,
}

impl TestServer {
    /// Start a test server on the specified port
    fn start(port: u16) -> Self {
        let process = Command::new("cargo")
            .args([
                "run",
                "-p",
                "miharu-server",
                "--bin",
                "miharu-server",
                "--",
                "--port",
                &port.to_string(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start server");

        TestServer { process, port }
    }

    /// Get the WebSocket URL for this server
    fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    /// Get the HTTP base URL for this server
    fn http_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process when the test ends
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Poll the health endpoint until the server is up (covers the first-build delay)
async fn wait_for_health(client: &reqwest::Client, base_url: &str) {
    for _ in 0..600 {
        if let Ok(response) = client.get(format!("{}/api/health", base_url)).send().await
            && response.status().is_success()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    panic!("Server did not become healthy in time");
}

/// Receive the next text frame with a timeout
async fn recv_text<S>(stream: &mut S) -> serde_json::Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let message = tokio::time::timeout(Duration::from_secs(10), stream.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Stream ended unexpectedly")
            .expect("WebSocket error");

        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("Frame is not valid JSON");
        }
    }
}

#[tokio::test]
async fn test_focus_pipeline_end_to_end() {
    let server = TestServer::start(TEST_PORT);
    let http = reqwest::Client::new();
    wait_for_health(&http, &server.http_url()).await;

    // Start a session so focus samples get persisted
    let response = http
        .post(format!("{}/api/session", server.http_url()))
        .json(&serde_json::json!({"session_id": "it-session"}))
        .send()
        .await
        .expect("Failed to start session");
    assert!(response.status().is_success());

    // Connect two students
    let (mut alice, _) = connect_async(format!(
        "{}?student_id=alice&name=Alice",
        server.ws_url()
    ))
    .await
    .expect("alice failed to connect");

    let greeting = recv_text(&mut alice).await;
    assert_eq!(greeting["type"], "classroom_connected");

    let (mut bob, _) = connect_async(format!("{}?student_id=bob&name=Bob", server.ws_url()))
        .await
        .expect("bob failed to connect");

    let greeting = recv_text(&mut bob).await;
    assert_eq!(greeting["type"], "classroom_connected");
    assert_eq!(greeting["students"].as_array().unwrap().len(), 2);

    // Alice reports a hidden tab (score 0)
    let report = serde_json::json!({
        "type": "focus_update",
        "timestamp": 1_700_000_000_000_i64,
        "isTabActive": false,
        "isFaceDetected": true,
        "score": 0
    });
    alice
        .send(Message::Text(report.to_string().into()))
        .await
        .expect("Failed to send focus update");

    // Bob receives the distraction alert first, then the snapshot
    let alert = recv_text(&mut bob).await;
    assert_eq!(alert["type"], "distracted_student");
    assert_eq!(alert["studentId"], "alice");
    assert_eq!(alert["studentName"], "Alice");
    assert_eq!(alert["score"], 0);
    assert_eq!(alert["cause"], "Tab Switch");

    let snapshot = recv_text(&mut bob).await;
    assert_eq!(snapshot["type"], "class_focus_snapshot");
    let students = snapshot["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    // Registration order: alice first, then bob
    assert_eq!(students[0]["studentId"], "alice");
    assert_eq!(students[0]["score"], 0);
    assert_eq!(students[0]["isTabActive"], false);
    assert_eq!(students[1]["studentId"], "bob");
    assert_eq!(students[1]["score"], 100);
    assert_eq!(students[1]["isTabActive"], true);

    // One row per received sample was persisted under the session
    let logs: serde_json::Value = http
        .get(format!(
            "{}/api/sessions/it-session/logs",
            server.http_url()
        ))
        .send()
        .await
        .expect("Failed to fetch logs")
        .json()
        .await
        .expect("Logs are not valid JSON");
    let rows = logs["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student_id"], "alice");
    assert_eq!(rows[0]["score"], 0);
    assert_eq!(rows[0]["is_tab_active"], false);
    assert_eq!(rows[0]["is_face_detected"], true);

    // After alice disconnects her focus record is gone, but the roster entry stays
    alice
        .send(Message::Close(None))
        .await
        .expect("Failed to close alice");
    drop(alice);
    tokio::time::sleep(Duration::from_millis(500)).await;

    let classroom: serde_json::Value = http
        .get(format!("{}/api/classroom", server.http_url()))
        .send()
        .await
        .expect("Failed to fetch classroom")
        .json()
        .await
        .expect("Classroom is not valid JSON");
    let tracked = classroom["tracked_students"].as_array().unwrap();
    assert!(!tracked.iter().any(|id| id == "alice"));
    assert_eq!(classroom["roster"].as_array().unwrap().len(), 2);
}
