/// HTTP API layer
///
/// REST endpoints for the node catalog, flow management, and execution
/// tracking. Handlers recover every domain error into a structured
/// response - validation problems come back with per-field detail so the
/// client can tell the user exactly which fields to fix.

use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::catalog::NodeCatalog;
use crate::error::FlowdeckError;
use crate::execution::{ExecutionBackend, ExecutionCoordinator};
use crate::flow::FlowStorage;

// Node catalog endpoints
pub mod node_types;

// Flow CRUD and validation endpoints
pub mod flows;

// Execution submission, tracking, stats, and artifact endpoints
pub mod executions;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Flow storage for persistence
    pub storage: FlowStorage,
    /// Swap-on-refresh node catalog
    pub catalog: Arc<NodeCatalog>,
    /// Execution backend client (status, history, artifacts)
    pub backend: Arc<dyn ExecutionBackend>,
    /// Run coordinator (submit + poll)
    pub coordinator: Arc<ExecutionCoordinator>,
}

/// Map a domain error to an HTTP response
///
/// 422 carries the structured validation report; submission and backend
/// problems map to gateway-style errors rather than opaque 500s.
pub fn error_response(err: FlowdeckError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        FlowdeckError::FlowNotFound(_) | FlowdeckError::NodeNotFound(_) => StatusCode::NOT_FOUND,
        FlowdeckError::UnknownNodeType { .. }
        | FlowdeckError::InvalidStructure(_)
        | FlowdeckError::ExecutionFailed(_)
        | FlowdeckError::ConfigurationInvalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FlowdeckError::SubmissionFailed(_) | FlowdeckError::BackendUnavailable(_) => {
            StatusCode::BAD_GATEWAY
        }
        FlowdeckError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        FlowdeckError::PollingTimeout => StatusCode::GATEWAY_TIMEOUT,
        FlowdeckError::Storage(_) | FlowdeckError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = match err {
        FlowdeckError::ConfigurationInvalid(report) => json!({
            "error": "flow configuration is invalid",
            "report": report,
        }),
        other => json!({ "error": other.to_string() }),
    };

    (status, Json(body))
}
