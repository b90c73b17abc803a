/// Execution REST endpoints
///
/// Submitting a run validates the flow against the execution-input
/// schemas, shapes the per-node payload through the variable binder, then
/// hands off to the coordinator. Status, history, stats, and artifacts
/// are read through the backend.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::api::{error_response, AppState};
use crate::binding::prepare_submission;
use crate::error::FlowdeckError;
use crate::execution::summarize;
use crate::validator::{validate_flow, ValidationPurpose};

/// History query parameters
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

/// Create execution routes
pub fn create_execution_routes() -> Router<AppState> {
    Router::new()
        .route("/api/flows/{id}/execute", post(execute_flow))
        .route("/api/flows/{id}/executions", get(list_executions))
        .route("/api/flows/{id}/stats", get(flow_stats))
        .route("/api/executions/{id}", get(get_execution))
        .route("/api/executions/{id}/artifacts", get(list_artifacts))
        .route("/api/artifacts/{id}", delete(delete_artifact))
}

/// Submit a flow for execution
///
/// POST /api/flows/:id/execute
/// Body: per-node input overrides, e.g. { "t1": { "email": "a@b.c" } }
///
/// Validation gates submission: an invalid configuration is recovered
/// locally as a 422 report and the run is never created.
async fn execute_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(overrides): Json<HashMap<String, Map<String, Value>>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let flow = match state.storage.get_flow(&id).await {
        Ok(Some(flow)) => flow,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("flow not found: {}", id) })),
            ))
        }
        Err(e) => return Err(error_response(e)),
    };

    let report = validate_flow(&flow, &state.catalog, ValidationPurpose::Execute);
    if !report.is_ok() {
        tracing::debug!("Blocking execution of flow {}: configuration invalid", id);
        return Err(error_response(FlowdeckError::ConfigurationInvalid(report)));
    }

    let per_node_input = prepare_submission(&flow, &state.catalog, &overrides);

    match state.coordinator.start(&id, per_node_input).await {
        Ok(handle) => {
            tracing::info!("Execution {} accepted for flow {}", handle.execution_id, id);
            Ok(Json(json!({ "executionId": handle.execution_id })))
        }
        Err(e) => {
            tracing::error!("Failed to submit execution for flow {}: {}", id, e);
            Err(error_response(e))
        }
    }
}

/// Fetch one execution record
///
/// GET /api/executions/:id
async fn get_execution(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.backend.get_execution(&id).await {
        Ok(execution) => Ok(Json(json!(execution))),
        Err(e) => Err(error_response(e)),
    }
}

/// List recent executions for a flow
///
/// GET /api/flows/:id/executions?limit=50
async fn list_executions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let limit = params.limit.unwrap_or(50);
    match state.backend.list_executions(&id, limit).await {
        Ok(executions) => Ok(Json(json!({ "executions": executions }))),
        Err(e) => Err(error_response(e)),
    }
}

/// Summary metrics for a flow's recent executions
///
/// GET /api/flows/:id/stats
/// Recomputed from the latest fetched page; no caching.
async fn flow_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let limit = params.limit.unwrap_or(100);
    match state.backend.list_executions(&id, limit).await {
        Ok(executions) => Ok(Json(json!(summarize(&executions)))),
        Err(e) => Err(error_response(e)),
    }
}

/// List artifacts produced by an execution
///
/// GET /api/executions/:id/artifacts
async fn list_artifacts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.backend.list_artifacts(&id).await {
        Ok(artifacts) => Ok(Json(json!({ "artifacts": artifacts }))),
        Err(e) => Err(error_response(e)),
    }
}

/// Delete a single artifact
///
/// DELETE /api/artifacts/:id
async fn delete_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.backend.delete_artifact(&id).await {
        Ok(()) => Ok(Json(json!({ "message": "Artifact deleted successfully" }))),
        Err(e) => Err(error_response(e)),
    }
}
