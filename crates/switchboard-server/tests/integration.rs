use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;

use switchboard_core::dispatcher::Dispatcher;
use switchboard_core::forwarder::Forwarder;
use switchboard_core::registry::{Registry, RouteMethod, ServiceRoutes};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a router whose registry points the employee actions at `base`.
fn test_app(base: &str) -> axum::Router {
    let registry = Registry::build(&[ServiceRoutes::new("hr", base)
        .route("CreateEmployee", "/employees/create", RouteMethod::Post)
        .route("GetEmployee", "/employees/get", RouteMethod::Post)]);
    let dispatcher = Dispatcher::new(registry, Forwarder::new(Duration::from_secs(5)));
    switchboard_server::build_router(dispatcher)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a POST request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn execute_envelope(action: &str, args: serde_json::Value) -> serde_json::Value {
    json!({"action": action, "args": args, "mode": "execute"})
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_employee_relays_downstream_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/employees/create")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({
            "name": "Alice Smith",
            "email": "alice@company.com",
            "mode": "execute"
        })))
        .with_status(200)
        .with_body(r#"{"id":"emp_123","status":"created"}"#)
        .create_async()
        .await;

    let app = test_app(&server.url());
    let (status, body) = post_json(
        app,
        "/actions/execute",
        execute_envelope(
            "CreateEmployee",
            json!({"name": "Alice Smith", "email": "alice@company.com"}),
        ),
    )
    .await;

    // Exactly one downstream call, payload merged with mode.
    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "emp_123", "status": "created"}));
}

#[tokio::test]
async fn downstream_business_error_passes_through_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/employees/create")
        .with_status(422)
        .with_body(r#"{"error":"email already exists"}"#)
        .create_async()
        .await;

    let app = test_app(&server.url());
    let (status, body) = post_json(
        app,
        "/actions/execute",
        execute_envelope("CreateEmployee", json!({"email": "dupe@company.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"error": "email already exists"}));
}

#[tokio::test]
async fn repeated_requests_yield_identical_responses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/employees/get")
        .expect(3)
        .with_status(200)
        .with_body(r#"{"id":"emp_1","name":"Alice"}"#)
        .create_async()
        .await;

    let envelope = execute_envelope("GetEmployee", json!({"id": "emp_1"}));
    let mut responses = Vec::new();
    for _ in 0..3 {
        let app = test_app(&server.url());
        responses.push(post_json(app, "/actions/execute", envelope.clone()).await);
    }

    mock.assert_async().await;
    assert_eq!(responses[0], responses[1]);
    assert_eq!(responses[1], responses[2]);
    assert_eq!(responses[0].0, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Unknown action
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_action_returns_404_with_available_actions() {
    let app = test_app("http://hr");
    let (status, body) = post_json(
        app,
        "/actions/execute",
        execute_envelope("DeleteUniverse", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Unknown action: DeleteUniverse");
    assert_eq!(
        body["availableActions"],
        json!(["CreateEmployee", "GetEmployee"])
    );
}

// ---------------------------------------------------------------------------
// Envelope validation — each field independently
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_action_returns_400() {
    let app = test_app("http://hr");
    let (status, body) = post_json(
        app,
        "/actions/execute",
        json!({"args": {}, "mode": "execute"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: action");
}

#[tokio::test]
async fn missing_args_returns_400() {
    let app = test_app("http://hr");
    let (status, body) = post_json(
        app,
        "/actions/execute",
        json!({"action": "GetEmployee", "mode": "execute"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: args");
}

#[tokio::test]
async fn invalid_mode_returns_400() {
    let app = test_app("http://hr");
    let (status, body) = post_json(
        app,
        "/actions/execute",
        json!({"action": "GetEmployee", "args": {}, "mode": "EXECUTE"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "'mode' must be \"simulate\" or \"execute\", got \"EXECUTE\""
    );
}

#[tokio::test]
async fn non_json_body_returns_400_json_error() {
    let app = test_app("http://hr");
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/actions/execute")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("not json at all"))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "request body must be valid JSON");
}

// ---------------------------------------------------------------------------
// Transport failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_downstream_returns_500_with_message() {
    // Bind a port, then drop the listener so connecting is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let app = test_app(&format!("http://127.0.0.1:{port}"));
    let (status, body) = post_json(
        app,
        "/actions/execute",
        execute_envelope("GetEmployee", json!({"id": "emp_1"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    let message = body["message"].as_str().expect("message should be a string");
    assert!(!message.is_empty());
}

// ---------------------------------------------------------------------------
// Diagnostics endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_status_timestamp_and_actions() {
    let app = test_app("http://hr");
    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["registeredActions"],
        json!(["CreateEmployee", "GetEmployee"])
    );
    let timestamp = body["timestamp"].as_str().expect("timestamp should be a string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn index_lists_endpoints() {
    let app = test_app("http://hr");
    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "switchboard");
    assert!(body["endpoints"]["POST /actions/execute"].is_string());
    assert!(body["endpoints"]["GET /health"].is_string());
}
