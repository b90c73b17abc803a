/// Domain error taxonomy for the workflow execution subsystem
///
/// Every failure state is representable and displayable; nothing here is
/// fatal to the process. Validation problems carry per-field detail so the
/// caller can tell the user exactly which fields to fix.

use thiserror::Error;

use crate::validator::FlowValidationReport;

#[derive(Debug, Error)]
pub enum FlowdeckError {
    /// Catalog refresh failed; the previous catalog is retained.
    /// Surfaced as a non-fatal notice.
    #[error("node catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A flow node references a type id absent from the catalog.
    /// Validation fails closed rather than silently skipping the node.
    #[error("unknown node type: {type_id}")]
    UnknownNodeType { type_id: String },

    /// Missing required fields and/or malformed template expressions,
    /// reported per field.
    #[error("flow configuration is invalid")]
    ConfigurationInvalid(FlowValidationReport),

    /// The run could not even be created (network/backend rejection).
    /// Distinct from an execution that starts and later fails.
    #[error("failed to submit execution: {0}")]
    SubmissionFailed(String),

    /// The backend reported terminal failure; the message is passed
    /// through verbatim.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The client gave up waiting. The run may still be in progress on the
    /// backend, so this is distinct from ExecutionFailed.
    #[error("Execution timeout")]
    PollingTimeout,

    #[error("flow not found: {0}")]
    FlowNotFound(String),

    #[error("node not found in flow: {0}")]
    NodeNotFound(String),

    /// Structural graph problem: dangling edge or cycle.
    #[error("invalid flow structure: {0}")]
    InvalidStructure(String),

    /// Transport-level failure while talking to the execution backend.
    /// Polling fails fast on these rather than retrying indefinitely.
    #[error("execution backend request failed: {0}")]
    BackendUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
