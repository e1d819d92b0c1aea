// Copyright 2025 Cowboy AI, LLC.

//! Static file fallback for single-page front ends

use super::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::debug;

const API_HINT: &str = "Workflow Engine API - Use /api endpoints";

/// Serve the requested file, else `index.html`, else a plain-text hint
pub(crate) async fn serve(State(state): State<AppState>, request: Request) -> Response {
    let Some(root) = state.static_dir.as_deref() else {
        return (StatusCode::NOT_FOUND, "Static folder not configured").into_response();
    };

    let path = request.uri().path().to_owned();
    let service = ServeDir::new(root).fallback(ServeFile::new(root.join("index.html")));

    let response = match service.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        debug!(%path, "no static file or index, answering with API hint");
        return (StatusCode::OK, API_HINT).into_response();
    }
    response.into_response()
}
