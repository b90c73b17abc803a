/// Node catalog REST endpoints
///
/// Read endpoints serve the current snapshot; refresh is an explicit,
/// all-or-nothing replace. A failed refresh keeps the previous catalog in
/// place and reports a non-fatal notice.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::api::{error_response, AppState};

/// Create node catalog routes
pub fn create_node_type_routes() -> Router<AppState> {
    Router::new()
        .route("/api/node-types", get(list_node_types))
        .route("/api/node-types/categories", get(list_categories))
        .route("/api/node-types/refresh", post(refresh_catalog))
}

/// List all node type definitions in palette order
///
/// GET /api/node-types
async fn list_node_types(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": state.catalog.version(),
        "nodeTypes": state.catalog.types(),
    }))
}

/// List category descriptors with per-category counts
///
/// GET /api/node-types/categories
async fn list_categories(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "categories": state.catalog.categories() }))
}

/// Refresh the catalog from its source
///
/// POST /api/node-types/refresh
/// On failure the previous snapshot stays active and 503 is returned.
async fn refresh_catalog(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.catalog.refresh().await {
        Ok(version) => Ok(Json(json!({
            "message": "Node catalog refreshed",
            "version": version,
        }))),
        Err(e) => {
            tracing::warn!("Catalog refresh failed, keeping previous snapshot: {}", e);
            Err(error_response(e))
        }
    }
}
