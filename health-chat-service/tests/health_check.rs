//! Integration tests for the operational endpoints of a running server.

mod common;

use common::{test_config, TestApp};
use health_chat_service::services::providers::mock::MockTextProvider;
use std::sync::Arc;

#[tokio::test]
async fn root_returns_fixed_liveness_message() {
    let app = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::replying("unused")),
    )
    .await;

    let response = app
        .client
        .get(&app.address)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        serde_json::json!({"message": "Health Center AI Chat API is running"})
    );
}

#[tokio::test]
async fn root_is_unaffected_by_a_broken_provider() {
    let app = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::failing("provider down")),
    )
    .await;

    let response = app.client.get(&app.address).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Health Center AI Chat API is running");
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::replying("unused")),
    )
    .await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "health-chat-service");
}

#[tokio::test]
async fn readiness_follows_provider_health() {
    let ready = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::replying("unused")),
    )
    .await;
    let not_ready = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::failing("no key")),
    )
    .await;

    let ok = ready
        .client
        .get(format!("{}/ready", ready.address))
        .send()
        .await
        .unwrap();
    let unavailable = not_ready
        .client
        .get(format!("{}/ready", not_ready.address))
        .send()
        .await
        .unwrap();

    assert_eq!(ok.status().as_u16(), 200);
    assert_eq!(unavailable.status().as_u16(), 503);
    let body: serde_json::Value = unavailable.json().await.unwrap();
    assert_eq!(body["error"], "Service unavailable");
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = TestApp::spawn_with_provider(
        test_config(),
        Arc::new(MockTextProvider::replying("unused")),
    )
    .await;

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}
