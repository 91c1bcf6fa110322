//! Integration tests for the Lexiserve server
//!
//! Builds the real router over a small lexicon model and exercises the
//! HTTP contract end to end.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::future::join_all;
use lexiserve_engine::{ModelConfig, PipelineLoader};
use lexiserve_server::config::ServerConfig;
use lexiserve_server::routes::create_router;
use lexiserve_server::state::AppState;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

const EN_FR: &str = "\
cat {n} /kat/ :: chat {m}
hello world {phrase} :: bonjour le monde
";

const FR_EN: &str = "\
chat {m} /Sa/ :: cat
bonjour {interj} :: hello
bonjour le monde {phrase} :: hello world
monde {m} :: world
";

fn test_state() -> AppState {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(ServerConfig::default(), handle)
}

/// State whose model load already completed
fn ready_state() -> AppState {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en-fr.txt"), EN_FR).unwrap();
    std::fs::write(dir.path().join("fr-en.txt"), FR_EN).unwrap();

    let state = test_state();
    let pipeline = PipelineLoader::load(&ModelConfig::from_dir(dir.path())).unwrap();
    assert!(state.publish_pipeline(pipeline));
    state
}

fn ready_router() -> Router {
    create_router(ready_state())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_process(router: &Router, body: String) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_starting_then_ready() {
    let state = test_state();
    let router = create_router(state.clone());

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "starting");

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en-fr.txt"), EN_FR).unwrap();
    std::fs::write(dir.path().join("fr-en.txt"), FR_EN).unwrap();
    let pipeline = PipelineLoader::load(&ModelConfig::from_dir(dir.path())).unwrap();
    state.publish_pipeline(pipeline);

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["model"], "wiktionary-fr-en");
}

#[tokio::test]
async fn test_health_reports_failed_load() {
    let state = test_state();
    let router = create_router(state.clone());
    state.mark_load_failed();

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "failed");
}

#[tokio::test]
async fn test_process_before_ready_is_503_never_500() {
    let router = create_router(test_state());

    let (status, body) = post_process(&router, json!({"text": "chat"}).to_string()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "not_ready");
}

#[tokio::test]
async fn test_process_after_failed_load_is_503() {
    let state = test_state();
    let router = create_router(state.clone());
    state.mark_load_failed();

    let (status, body) = post_process(&router, json!({"text": "chat"}).to_string()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "not_ready");
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let router = ready_router();

    let (status, body) = post_process(&router, json!({"text": ""}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "empty_text");
}

#[tokio::test]
async fn test_over_length_text_is_rejected() {
    let router = ready_router();

    let text = "a".repeat(600);
    let (status, body) = post_process(&router, json!({ "text": text }).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "text_too_long");
}

#[tokio::test]
async fn test_unknown_direction_is_rejected() {
    let router = ready_router();

    let payload = json!({"text": "chat", "direction": "fr-de"});
    let (status, body) = post_process(&router, payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "unknown_direction");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let router = ready_router();

    let (status, body) = post_process(&router, "this is not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn test_translation_of_french_phrase() {
    let router = ready_router();

    let payload = json!({"text": "Bonjour le monde"});
    let (status, body) = post_process(&router, payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"], "Bonjour le monde");
    assert_eq!(body["detected_language"], "fr");

    let translations = body["translations"].as_array().unwrap();
    assert!(!translations.is_empty());
    assert!(translations.iter().any(|t| t["target"] == "hello world"));
}

#[tokio::test]
async fn test_response_strips_phonetics() {
    let router = ready_router();

    let (status, body) = post_process(&router, json!({"text": "chat"}).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let translations = body["translations"].as_array().unwrap();
    assert!(translations
        .iter()
        .all(|t| !t["source"].as_str().unwrap().contains('/')));
}

#[tokio::test]
async fn test_repeated_requests_are_deterministic() {
    let router = ready_router();
    let payload = json!({"text": "chat"}).to_string();

    let (_, first) = post_process(&router, payload.clone()).await;
    let (_, second) = post_process(&router, payload).await;

    assert_eq!(first["translations"], second["translations"]);
    assert_eq!(first["detected_language"], second["detected_language"]);
    assert_eq!(first["normalized"], second["normalized"]);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_leak_across_results() {
    let router = ready_router();

    let texts: Vec<String> = (0..50).map(|i| format!("chat numero {}", i)).collect();
    let calls = texts.iter().map(|text| {
        let router = router.clone();
        let payload = json!({ "text": text }).to_string();
        async move { post_process(&router, payload).await }
    });

    let responses = join_all(calls).await;
    for (text, (status, body)) in texts.iter().zip(responses) {
        assert_eq!(status, StatusCode::OK);
        // Each response echoes exactly the request it belongs to
        assert_eq!(body["input"], text.as_str());
    }
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let router = ready_router();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = ready_router();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
