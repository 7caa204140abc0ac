//! Endpoint integration tests against in-memory SQLite stores.
//!
//! Covers the fail-open badge contract, the mark-as-read request
//! validation and the full send → badge → mark-read → badge flow.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gamelink_server::routes::router;
use gamelink_server::state::AppState;
use storage::{ConversationRepository, ReadMarkerRepository, SessionRepository};
use unread_core::LastMessage;

async fn test_app() -> (Router, ConversationRepository, SessionRepository) {
    let conversations = ConversationRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create conversation repository");
    let markers = ReadMarkerRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create read-marker repository");
    let sessions = SessionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create session repository");

    let app = router(AppState::new(
        conversations.clone(),
        markers,
        sessions.clone(),
    ));
    (app, conversations, sessions)
}

async fn get_count(app: &Router, token: Option<&str>) -> serde_json::Value {
    let mut builder = Request::builder().uri("/api/unread-count");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

async fn post_read(
    app: &Router,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/conversations/read")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).expect("request"))
        .await
        .expect("response");
    let status = response.status();

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn test_unauthenticated_badge_is_zero() {
    let (app, _conversations, _sessions) = test_app().await;

    let body = get_count(&app, None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_unknown_token_badge_is_zero() {
    let (app, _conversations, _sessions) = test_app().await;

    let body = get_count(&app, Some("not-a-session")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_own_message_never_counts() {
    let (app, conversations, sessions) = test_app().await;

    let conversation = conversations
        .create_conversation("alice", "bob")
        .await
        .expect("create conversation");
    conversations
        .record_latest(&LastMessage::new(&conversation.id, "alice", "sent by me"))
        .await
        .expect("record message");
    sessions
        .insert_session("tok-alice", "alice")
        .await
        .expect("insert session");

    // No read marker exists, but the last message is alice's own.
    let body = get_count(&app, Some("tok-alice")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_send_badge_mark_read_flow() {
    let (app, conversations, sessions) = test_app().await;

    let conversation = conversations
        .create_conversation("alice", "bob")
        .await
        .expect("create conversation");
    sessions
        .insert_session("tok-alice", "alice")
        .await
        .expect("insert session");

    conversations
        .record_latest(&LastMessage::new(&conversation.id, "bob", "hi alice"))
        .await
        .expect("record message");

    let body = get_count(&app, Some("tok-alice")).await;
    assert_eq!(body["count"], 1);

    let payload = format!(r#"{{"conversationId":"{}"}}"#, conversation.id);
    let (status, body) = post_read(&app, Some("tok-alice"), &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let body = get_count(&app, Some("tok-alice")).await;
    assert_eq!(body["count"], 0);

    // Marking read twice in a row changes nothing downstream.
    let (status, _) = post_read(&app, Some("tok-alice"), &payload).await;
    assert_eq!(status, StatusCode::OK);
    let body = get_count(&app, Some("tok-alice")).await;
    assert_eq!(body["count"], 0);

    // A newer message from bob makes the conversation unread again.
    conversations
        .record_latest(&LastMessage::new(&conversation.id, "bob", "still there?"))
        .await
        .expect("record message");
    let body = get_count(&app, Some("tok-alice")).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_mark_read_requires_authentication() {
    let (app, _conversations, _sessions) = test_app().await;

    let (status, body) = post_read(&app, None, r#"{"conversationId":"c1"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mark_read_rejects_missing_conversation_id() {
    let (app, _conversations, sessions) = test_app().await;

    sessions
        .insert_session("tok-alice", "alice")
        .await
        .expect("insert session");

    let (status, body) = post_read(&app, Some("tok-alice"), r#"{"conversationId":""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_read(&app, Some("tok-alice"), r#"{}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
