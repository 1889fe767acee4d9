//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use lim_core::{AIClient, Coach, MockBackend, EXPLAIN_FALLBACK};
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(Coach::new(AIClient::mock()), ServerConfig::default())
}

fn setup_broken_backend_app() -> Router {
    create_router(
        Coach::new(AIClient::Mock(MockBackend::unhealthy())),
        ServerConfig::default(),
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"LIM AI backend is running");
}

// ========== Explain ==========

#[tokio::test]
async fn test_explain_soft_block() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "today_limit": 100.0, "spent_today": 90.0 },
        "attempted_spend": 20.0
    });

    let response = app.oneshot(post_json("/lim-ai/explain", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["decision"], "SOFT_BLOCK");
    assert!(json["impact"].as_str().unwrap().contains("10.00"));
    assert!(!json["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_explain_block_on_severe_overage() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "today_limit": 100.0, "spent_today": 90.0, "attempted_spend": 70.0 }
    });

    let response = app.oneshot(post_json("/lim-ai/explain", body)).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["decision"], "BLOCK");
}

#[tokio::test]
async fn test_explain_top_level_attempted_spend_overrides_context() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "today_limit": 100.0, "spent_today": 0.0, "attempted_spend": 500.0 },
        "attempted_spend": 10.0
    });

    let response = app.oneshot(post_json("/lim-ai/explain", body)).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["decision"], "ALLOW");
}

#[tokio::test]
async fn test_explain_requires_context() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/lim-ai/explain", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Context is required");
}

#[tokio::test]
async fn test_explain_rejects_non_positive_limit() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "today_limit": 0.0, "spent_today": 10.0 }
    });

    let response = app.oneshot(post_json("/lim-ai/explain", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("today_limit"));
}

#[tokio::test]
async fn test_explain_falls_back_when_backend_down() {
    let app = setup_broken_backend_app();

    let body = serde_json::json!({
        "context": { "today_limit": 100.0, "spent_today": 90.0, "attempted_spend": 70.0 }
    });

    let response = app.oneshot(post_json("/lim-ai/explain", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    // Decision is still computed locally; only the prose degrades
    assert_eq!(json["decision"], "BLOCK");
    assert_eq!(json["message"], EXPLAIN_FALLBACK);
}

// ========== Ask ==========

#[tokio::test]
async fn test_ask() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "query": "Can I afford a concert ticket?",
        "context": { "today_limit": 100.0, "spent_today": 40.0 }
    });

    let response = app.oneshot(post_json("/lim-ai/ask", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("concert ticket"));
}

#[tokio::test]
async fn test_ask_requires_query_and_context() {
    let app = setup_test_app();

    let body = serde_json::json!({ "query": "hello" });
    let response = app
        .clone()
        .oneshot(post_json("/lim-ai/ask", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "context": {} });
    let response = app.oneshot(post_json("/lim-ai/ask", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Nudge ==========

#[tokio::test]
async fn test_nudge_weekend_pattern_with_injected_day() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "spent_today": 60.0, "today_limit": 100.0, "recent_breaches": 0 },
        "day_of_week": "sat"
    });

    let response = app.oneshot(post_json("/lim-ai/nudge", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["trigger"], "WEEKEND_SPENDING_PATTERN");
}

#[tokio::test]
async fn test_nudge_priority_short_circuits() {
    let app = setup_test_app();

    // 90% usage and 5 breaches: rule 1 wins
    let body = serde_json::json!({
        "context": { "spent_today": 90.0, "today_limit": 100.0, "recent_breaches": 5 },
        "day_of_week": "tue"
    });

    let response = app.oneshot(post_json("/lim-ai/nudge", body)).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["trigger"], "LIMIT_APPROACHING");
}

#[tokio::test]
async fn test_nudge_quiet_snapshot_has_null_trigger() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "spent_today": 10.0, "today_limit": 100.0, "recent_breaches": 0 },
        "day_of_week": "wed"
    });

    let response = app.oneshot(post_json("/lim-ai/nudge", body)).await.unwrap();
    let json = get_body_json(response).await;
    assert!(json["trigger"].is_null());
    assert!(!json["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_nudge_requires_context() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/lim-ai/nudge", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nudge_rejects_bad_day_of_week() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "context": { "spent_today": 10.0, "today_limit": 100.0 },
        "day_of_week": "someday"
    });

    let response = app.oneshot(post_json("/lim-ai/nudge", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
