/// Flow management REST endpoints
///
/// CRUD for flow definitions plus duplicate/archive and a configuration
/// test endpoint. Structural and configuration problems are returned as
/// structured reports, never opaque errors.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{error_response, AppState};
use crate::flow::storage::FlowListQuery;
use crate::flow::{Flow, FlowStatus};
use crate::validator::{validate_flow, ValidationPurpose};

/// Request body for flow creation/update
#[derive(Debug, Deserialize)]
pub struct SaveFlowRequest {
    pub flow: Flow,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<FlowStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create flow management routes
pub fn create_flow_routes() -> Router<AppState> {
    Router::new()
        .route("/api/flows", post(create_flow))
        .route("/api/flows", get(list_flows))
        .route("/api/flows/{id}", get(get_flow))
        .route("/api/flows/{id}", put(update_flow))
        .route("/api/flows/{id}", delete(delete_flow))
        .route("/api/flows/{id}/duplicate", post(duplicate_flow))
        .route("/api/flows/{id}/archive", post(archive_flow))
        .route("/api/flows/{id}/validate", post(validate_flow_config))
}

/// Create a new flow
///
/// POST /api/flows
/// Body: { "flow": { "id": "...", "name": "...", "nodes": [...], "edges": [...] } }
async fn create_flow(
    State(state): State<AppState>,
    Json(payload): Json<SaveFlowRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let flow = payload.flow;

    if flow.id.is_empty() || flow.name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "flow id and name are required" })),
        ));
    }

    match state.storage.get_flow(&flow.id).await {
        Ok(Some(_)) => {
            return Err((
                StatusCode::CONFLICT,
                Json(json!({ "error": format!("flow already exists: {}", flow.id) })),
            ))
        }
        Ok(None) => {}
        Err(e) => return Err(error_response(e)),
    }

    flow.validate_structure().map_err(error_response)?;

    if let Err(e) = state.storage.save_flow(&flow).await {
        tracing::error!("Failed to save flow: {}", e);
        return Err(error_response(e));
    }

    tracing::info!("Created flow: {} ({})", flow.id, flow.name);

    Ok(Json(json!({
        "id": flow.id,
        "message": format!("Flow '{}' created successfully", flow.name),
    })))
}

/// List flows with optional status filter and pagination
///
/// GET /api/flows?status=published&limit=20&offset=0
async fn list_flows(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let query = FlowListQuery {
        status: params.status,
        limit: params.limit,
        offset: params.offset,
    };

    match state.storage.list_flows(query).await {
        Ok(flows) => Ok(Json(json!({ "flows": flows }))),
        Err(e) => {
            tracing::error!("Failed to list flows: {}", e);
            Err(error_response(e))
        }
    }
}

/// Get a specific flow by ID
///
/// GET /api/flows/:id
async fn get_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flow>, (StatusCode, Json<Value>)> {
    match state.storage.get_flow(&id).await {
        Ok(Some(flow)) => Ok(Json(flow)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("flow not found: {}", id) })),
        )),
        Err(e) => {
            tracing::error!("Failed to get flow {}: {}", id, e);
            Err(error_response(e))
        }
    }
}

/// Update an existing flow
///
/// PUT /api/flows/:id
async fn update_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveFlowRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut flow = payload.flow;
    // The URL parameter is authoritative
    flow.id = id.clone();

    if flow.name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "flow name is required" })),
        ));
    }

    match state.storage.get_flow(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("flow not found: {}", id) })),
            ))
        }
        Err(e) => return Err(error_response(e)),
    }

    flow.validate_structure().map_err(error_response)?;

    if let Err(e) = state.storage.save_flow(&flow).await {
        tracing::error!("Failed to update flow: {}", e);
        return Err(error_response(e));
    }

    tracing::info!("Updated flow: {} ({})", flow.id, flow.name);

    Ok(Json(json!({
        "id": flow.id,
        "message": format!("Flow '{}' updated successfully", flow.name),
    })))
}

/// Delete a flow
///
/// DELETE /api/flows/:id
async fn delete_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Stop any active poll loop watching this flow's current run
    state.coordinator.stop(&id).await;

    match state.storage.delete_flow(&id).await {
        Ok(true) => {
            tracing::info!("Deleted flow: {}", id);
            Ok(Json(json!({ "message": "Flow deleted successfully" })))
        }
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("flow not found: {}", id) })),
        )),
        Err(e) => {
            tracing::error!("Failed to delete flow: {}", e);
            Err(error_response(e))
        }
    }
}

/// Duplicate a flow under a fresh id
///
/// POST /api/flows/:id/duplicate
async fn duplicate_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flow>, (StatusCode, Json<Value>)> {
    state
        .storage
        .duplicate_flow(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Archive a flow
///
/// POST /api/flows/:id/archive
async fn archive_flow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flow>, (StatusCode, Json<Value>)> {
    state
        .storage
        .archive_flow(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Test a flow's configuration without executing it
///
/// POST /api/flows/:id/validate
/// Always 200 with the report; the ok flag gates the execute action
/// client-side.
async fn validate_flow_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
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

    let report = validate_flow(&flow, &state.catalog, ValidationPurpose::Configure);

    Ok(Json(json!({
        "ok": report.is_ok(),
        "report": report,
    })))
}
