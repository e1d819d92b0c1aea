// Copyright 2025 Cowboy AI, LLC.

//! Route handlers: definitions, instances, actions, health

use super::{ApiError, ApiResponse, AppState, SERVICE_NAME};
use crate::store::StoreStats;
use crate::workflow::{
    Action, InstanceRecord, InstanceSummary, NewWorkflowDefinition, WorkflowDefinition,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Body of `POST /api/instances`
#[derive(Debug, Deserialize)]
struct StartInstanceRequest {
    definition_id: String,
    #[serde(default)]
    instance_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthReport {
    service: &'static str,
    status: &'static str,
    #[serde(flatten)]
    stats: StoreStats,
}

/// Unwrap a JSON object body, checking that `required` keys are present
fn object_body(
    payload: Result<Json<Value>, JsonRejection>,
    required: &[&str],
) -> Result<Value, ApiError> {
    let Json(body) = payload?;

    let Some(object) = body.as_object().filter(|o| !o.is_empty()) else {
        return Err(ApiError::bad_request(
            "Request body must contain JSON data",
        ));
    };

    if let Some(missing) = required.iter().find(|key| !object.contains_key(**key)) {
        return Err(ApiError::bad_request(format!(
            "Missing required field: {missing}"
        )));
    }

    Ok(body)
}

/// GET /health
pub(crate) async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": SERVICE_NAME,
        })),
    )
}

/// GET /api/health
pub(crate) async fn api_health(State(state): State<AppState>) -> Json<ApiResponse<HealthReport>> {
    ApiResponse::ok(HealthReport {
        service: SERVICE_NAME,
        status: "healthy",
        stats: state.store.stats(),
    })
}

/// GET /api/schema
pub(crate) async fn definition_schema() -> Json<ApiResponse<schemars::schema::RootSchema>> {
    ApiResponse::ok(schemars::schema_for!(NewWorkflowDefinition))
}

/// POST /api/definitions
pub(crate) async fn create_definition(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Arc<WorkflowDefinition>> {
    let body = object_body(payload, &["id", "name"])?;
    let input: NewWorkflowDefinition = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid workflow definition: {e}")))?;

    let definition = state.store.create_workflow_definition(input)?;
    let message = format!(
        "Workflow definition '{}' created successfully",
        definition.id()
    );
    Ok(ApiResponse::with_message(definition, message))
}

/// GET /api/definitions
pub(crate) async fn list_definitions(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<Arc<WorkflowDefinition>>>> {
    ApiResponse::ok(state.store.list_workflow_definitions())
}

/// GET /api/definitions/:definition_id
pub(crate) async fn get_definition(
    State(state): State<AppState>,
    Path(definition_id): Path<String>,
) -> ApiResult<Arc<WorkflowDefinition>> {
    state
        .store
        .get_workflow_definition(&definition_id)
        .map(ApiResponse::ok)
        .ok_or_else(|| {
            ApiError::not_found(format!("Workflow definition '{definition_id}' not found"))
        })
}

/// POST /api/instances
pub(crate) async fn start_instance(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<InstanceRecord> {
    let body = object_body(payload, &["definition_id"])?;
    let request: StartInstanceRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid instance request: {e}")))?;

    let record = state
        .store
        .start_workflow_instance(&request.definition_id, request.instance_id)?;
    let message = format!(
        "Workflow instance '{}' started successfully",
        record.instance.id()
    );
    Ok(ApiResponse::with_message(record, message))
}

/// GET /api/instances
pub(crate) async fn list_instances(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<InstanceRecord>>> {
    ApiResponse::ok(state.store.list_workflow_instances())
}

/// GET /api/instances/:instance_id
pub(crate) async fn get_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> ApiResult<InstanceSummary> {
    state
        .store
        .get_instance_summary(&instance_id)
        .map(ApiResponse::ok)
        .ok_or_else(|| instance_not_found(&instance_id))
}

/// GET /api/instances/:instance_id/actions
pub(crate) async fn list_available_actions(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> ApiResult<Vec<Action>> {
    state
        .store
        .get_available_actions(&instance_id)
        .map(ApiResponse::ok)
        .ok_or_else(|| instance_not_found(&instance_id))
}

/// POST /api/instances/:instance_id/actions/:action_id
pub(crate) async fn execute_action(
    State(state): State<AppState>,
    Path((instance_id, action_id)): Path<(String, String)>,
) -> ApiResult<InstanceSummary> {
    let summary = state
        .store
        .execute_action_with_summary(&instance_id, &action_id)?;
    Ok(ApiResponse::with_message(
        summary,
        format!("Action '{action_id}' executed successfully"),
    ))
}

fn instance_not_found(instance_id: &str) -> ApiError {
    ApiError::not_found(format!("Workflow instance '{instance_id}' not found"))
}
