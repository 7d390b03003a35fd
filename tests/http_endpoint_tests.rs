//! Chat endpoint tests driven through the axum router.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chatrelay::connector::adapter::http::routes;
use chatrelay::{Container, ContainerConfig, RelayConfig};
use common::{test_config, RecordingSleeper, ScriptedTransport};

fn mock_app(relay: RelayConfig) -> axum::Router {
    routes(Arc::new(Container::new(ContainerConfig {
        relay,
        mock_api: true,
    })))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("app should handle request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body should be readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body must be JSON")
    };
    (status, body)
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request build should succeed")
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request build should succeed")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request build should succeed")
}

#[tokio::test]
async fn json_chat_returns_reply_and_thread() {
    let (status, body) = send(
        mock_app(test_config()),
        post_json("/chat", json!({"message": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "You said: Hello");
    assert!(body["data"]["thread_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("thread_")));
}

#[tokio::test]
async fn form_chat_continues_thread() {
    let app = mock_app(test_config());

    let (_, first) = send(app.clone(), post_form("/chat", "message=Hi&thread_id=")).await;
    let thread = first["data"]["thread_id"].as_str().unwrap().to_string();

    let (status, second) = send(
        app,
        post_form("/chat", &format!("message=What%27s+up%3F&thread_id={thread}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], true);
    assert_eq!(second["data"]["thread_id"], thread.as_str());
    assert_eq!(second["data"]["message"], "You said: What's up?");
}

#[tokio::test]
async fn message_is_sanitized_before_relay() {
    let (_, body) = send(
        mock_app(test_config()),
        post_json("/chat", json!({"message": "  <b>Hello</b>\n  world "})),
    )
    .await;

    assert_eq!(body["data"]["message"], "You said: Hello world");
}

#[tokio::test]
async fn empty_message_is_rejected_inline() {
    let (status, body) = send(
        mock_app(test_config()),
        post_json("/chat", json!({"message": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "data": {"message": "Empty message."}}));
}

#[tokio::test]
async fn relay_failure_is_reported_in_envelope() {
    let (status, body) = send(
        mock_app(RelayConfig::new("", "asst_test")),
        post_json("/chat", json!({"message": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["kind"], "configuration");
    assert_eq!(body["data"]["message"], "API key is not configured.");
}

#[tokio::test]
async fn unknown_thread_surfaces_remote_rejection() {
    let (_, body) = send(
        mock_app(test_config()),
        post_json("/chat", json!({"message": "Hello", "thread_id": "thread_missing"})),
    )
    .await;

    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["kind"], "remote_rejection");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(mock_app(test_config()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn validate_reports_assistant_summary() {
    let (status, body) = send(mock_app(test_config()), get("/validate")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], "asst_test");
    assert_eq!(body["data"]["name"], "Mock Assistant");
}

#[tokio::test]
async fn validate_uses_injected_transport() {
    let transport = Arc::new(ScriptedTransport::new().on(
        chatrelay::HttpMethod::Get,
        "/assistants/asst_test",
        404,
        json!({"error": {"message": "No assistant found with id 'asst_test'."}}),
    ));
    let container = Container::with_services(
        ContainerConfig {
            relay: test_config(),
            mock_api: false,
        },
        transport,
        Arc::new(RecordingSleeper::new()),
    );

    let (_, body) = send(routes(Arc::new(container)), get("/validate")).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["kind"], "remote_rejection");
    assert_eq!(
        body["data"]["message"],
        "Assistant API error when validating credentials (code 404): No assistant found with id 'asst_test'."
    );
}

#[tokio::test]
async fn health_is_ok() {
    let (status, _) = send(mock_app(test_config()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}
