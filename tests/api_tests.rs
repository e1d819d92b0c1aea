// Copyright 2025 Cowboy AI, LLC.

//! HTTP API tests driving the router in-process

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cim_workflow_engine::api::{router, AppState};
use cim_workflow_engine::WorkflowStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(WorkflowStore::new()), None))
}

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, json_request(method, uri, body)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn order_definition() -> Value {
    json!({
        "id": "order",
        "name": "Order Processing",
        "states": [
            {"id": "new", "name": "New", "is_initial": true},
            {"id": "approved", "name": "Approved"},
            {"id": "shipped", "name": "Shipped", "is_final": true}
        ],
        "actions": [
            {"id": "approve", "name": "Approve", "from_states": ["new"], "to_state": "approved"},
            {"id": "ship", "name": "Ship", "from_states": ["approved"], "to_state": "shipped"}
        ]
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "workflow-engine"}));

    send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {
                "service": "workflow-engine",
                "status": "healthy",
                "definitions_count": 1,
                "instances_count": 0
            }
        })
    );
}

#[tokio::test]
async fn test_create_and_fetch_definition() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Workflow definition 'order' created successfully");
    assert_eq!(body["data"]["states"]["new"]["is_initial"], true);
    assert_eq!(body["data"]["actions"]["approve"]["enabled"], true);

    let (status, body) = send(&app, Method::GET, "/api/definitions/order", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Order Processing");

    let (_, body) = send(&app, Method::GET, "/api/definitions", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::GET, "/api/definitions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "error": "Workflow definition 'nope' not found"})
    );
}

#[tokio::test]
async fn test_definition_input_errors() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/definitions", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body must contain JSON data");

    let (status, body) =
        send(&app, Method::POST, "/api/definitions", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: id");

    let (status, body) =
        send(&app, Method::POST, "/api/definitions", Some(json!({"id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: name");

    let mut invalid = order_definition();
    invalid["states"][0]["is_initial"] = json!(false);
    let (status, body) = send(&app, Method::POST, "/api/definitions", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Validation errors: Workflow must have exactly one initial state"
    );

    send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;
    let (status, body) = send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Workflow definition with ID 'order' already exists");
}

#[tokio::test]
async fn test_malformed_json_is_a_structured_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/definitions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, bytes) = send_raw(&app, request).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Invalid JSON body")));
}

#[tokio::test]
async fn test_instance_lifecycle() {
    let app = app();
    send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/instances",
        Some(json!({"definition_id": "order", "instance_id": "o-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Workflow instance 'o-1' started successfully");
    assert_eq!(body["data"]["id"], "o-1");
    assert_eq!(body["data"]["current_state_id"], "new");
    assert_eq!(body["data"]["is_final"], false);
    assert_eq!(body["data"]["history"], json!([]));

    let (status, body) = send(&app, Method::GET, "/api/instances/o-1/actions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "approve");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) =
        send(&app, Method::POST, "/api/instances/o-1/actions/approve", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Action 'approve' executed successfully");
    assert_eq!(body["data"]["current_state"]["id"], "approved");
    assert_eq!(body["data"]["instance"]["history"][0]["from_state_id"], "new");
    assert_eq!(body["data"]["available_actions"][0]["id"], "ship");

    send(&app, Method::POST, "/api/instances/o-1/actions/ship", None).await;
    let (status, body) = send(&app, Method::GET, "/api/instances/o-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["instance"]["is_final"], true);
    assert_eq!(body["data"]["available_actions"], json!([]));

    let (status, body) =
        send(&app, Method::POST, "/api/instances/o-1/actions/approve", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot execute actions from final state 'shipped'"
    );

    let (_, body) = send(&app, Method::GET, "/api/instances", None).await;
    assert_eq!(body["data"][0]["id"], "o-1");
    assert_eq!(body["data"][0]["is_final"], true);
}

#[tokio::test]
async fn test_instance_errors() {
    let app = app();
    send(&app, Method::POST, "/api/definitions", Some(order_definition())).await;

    let (status, body) =
        send(&app, Method::POST, "/api/instances", Some(json!({"instance_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: definition_id");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/instances",
        Some(json!({"definition_id": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Workflow definition 'nope' not found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/instances",
        Some(json!({"definition_id": "order", "instance_id": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["id"].as_str().is_some_and(|id| !id.is_empty()));

    for uri in ["/api/instances/ghost", "/api/instances/ghost/actions"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Workflow instance 'ghost' not found");
    }

    let (status, _) =
        send(&app, Method::POST, "/api/instances/ghost/actions/approve", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schema_describes_definition_payload() {
    let (status, body) = send(&app(), Method::GET, "/api/schema", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "NewWorkflowDefinition");
    assert!(body["data"]["properties"]["states"].is_object());
}

#[tokio::test]
async fn test_static_folder_not_configured() {
    let (status, bytes) = send_raw(&app(), json_request(Method::GET, "/", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(bytes, b"Static folder not configured");
}

fn static_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("workflow-engine-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&root).unwrap();
    root
}

#[tokio::test]
async fn test_static_files_with_index_fallback() {
    let root = static_root();
    std::fs::write(root.join("index.html"), "<h1>index</h1>").unwrap();
    std::fs::write(root.join("app.js"), "console.log(1)").unwrap();
    let app = router(AppState::new(
        Arc::new(WorkflowStore::new()),
        Some(root.clone()),
    ));

    let (status, bytes) = send_raw(&app, json_request(Method::GET, "/app.js", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"console.log(1)");

    let (status, bytes) =
        send_raw(&app, json_request(Method::GET, "/orders/42", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"<h1>index</h1>");

    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn test_static_hint_without_index() {
    let root = static_root();
    let app = router(AppState::new(
        Arc::new(WorkflowStore::new()),
        Some(root.clone()),
    ));

    let (status, bytes) = send_raw(&app, json_request(Method::GET, "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Workflow Engine API - Use /api endpoints");

    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn test_static_file_names_are_percent_decoded() {
    let root = static_root();
    std::fs::write(root.join("index.html"), "INDEX").unwrap();
    std::fs::write(root.join("my file.js"), "FILE").unwrap();
    let app = router(AppState::new(
        Arc::new(WorkflowStore::new()),
        Some(root.clone()),
    ));

    let (status, bytes) =
        send_raw(&app, json_request(Method::GET, "/my%20file.js", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"FILE");

    let (status, bytes) =
        send_raw(&app, json_request(Method::GET, "/../../etc/passwd", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"INDEX");

    std::fs::remove_dir_all(root).unwrap();
}
