// Copyright 2025 Cowboy AI, LLC.

//! HTTP JSON API over the workflow store
//!
//! Endpoints:
//! - GET  /health                                         - Liveness
//! - GET  /api/health                                     - Registry sizes
//! - GET  /api/schema                                     - JSON Schema of a definition payload
//! - POST /api/definitions                                - Create a definition
//! - GET  /api/definitions                                - List definitions
//! - GET  /api/definitions/:definition_id                 - Get a definition
//! - POST /api/instances                                  - Start an instance
//! - GET  /api/instances                                  - List instances
//! - GET  /api/instances/:instance_id                     - Instance summary
//! - GET  /api/instances/:instance_id/actions             - Available actions
//! - POST /api/instances/:instance_id/actions/:action_id  - Execute an action
//!
//! Any other path is served from the static directory, falling back to
//! `index.html` for client-side routing.
//!
//! Every JSON response carries a `success` flag plus either `data` and an
//! optional `message`, or an `error` string.

mod handlers;
mod static_files;

use crate::errors::WorkflowError;
use crate::store::WorkflowStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Service name reported by the health endpoints
pub const SERVICE_NAME: &str = "workflow-engine";

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// The workflow registry
    pub store: Arc<WorkflowStore>,
    /// Directory served for non-API paths; `None` disables static files
    pub static_dir: Option<Arc<Path>>,
}

impl AppState {
    /// Create state around an existing store
    pub fn new(store: Arc<WorkflowStore>, static_dir: Option<PathBuf>) -> Self {
        Self {
            store,
            static_dir: static_dir.map(Arc::from),
        }
    }
}

/// Response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this type; failures go through [`ApiError`]
    pub success: bool,
    /// Human-readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    /// Successful response carrying `data` and a message
    pub fn with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        })
    }
}

/// A failed request, rendered as `{"success": false, "error": ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with the given message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 with the given message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// HTTP status of this error
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        if err.is_not_found() {
            Self::not_found(err.to_string())
        } else {
            Self::bad_request(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::api_health))
        .route("/api/schema", get(handlers::definition_schema))
        .route(
            "/api/definitions",
            post(handlers::create_definition).get(handlers::list_definitions),
        )
        .route("/api/definitions/:definition_id", get(handlers::get_definition))
        .route(
            "/api/instances",
            post(handlers::start_instance).get(handlers::list_instances),
        )
        .route("/api/instances/:instance_id", get(handlers::get_instance))
        .route(
            "/api/instances/:instance_id/actions",
            get(handlers::list_available_actions),
        )
        .route(
            "/api/instances/:instance_id/actions/:action_id",
            post(handlers::execute_action),
        )
        .fallback(static_files::serve)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
