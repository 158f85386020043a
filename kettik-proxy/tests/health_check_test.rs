mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn health_check_works_without_upstream() {
    // Nothing is listening here; health must not care.
    let app = TestApp::spawn("http://127.0.0.1:9").await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "kettik-proxy");
    assert_eq!(body["service_key_loaded"], true);
    assert_eq!(body["upstream"], "http://127.0.0.1:9");
}

#[tokio::test]
async fn health_check_reports_missing_service_key() {
    let app = TestApp::spawn_with("http://127.0.0.1:9", "", None, 5).await;
    let client = Client::new();

    let body: serde_json::Value = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["service_key_loaded"], false);
}
