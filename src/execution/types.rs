/// Execution and artifact data models
///
/// One Execution tracks a single run of a flow through its lifecycle. The
/// record is owned by the execution backend: this subsystem initiates runs
/// and reads status, but never writes these fields itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of an execution
///
/// Some backends report the running phase as "processing"; both spellings
/// map to Running. Completed and Failed are terminal: progress counts and
/// duration are frozen once either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    #[serde(alias = "processing")]
    Running,
    Completed,
    Failed,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionStatus::Completed | ExecutionStatus::Failed)
    }
}

/// One run instance of a flow
///
/// Invariant: `completed_nodes` is monotonically non-decreasing while the
/// status is pending/running and satisfies
/// `0 <= completed_nodes <= total_nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub flow_id: String,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Final output payload, present once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default)]
    pub total_nodes: u32,
    #[serde(default)]
    pub completed_nodes: u32,
}

/// Media kind of an execution artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    Image,
    Video,
    Audio,
    Document,
    Text,
    Other,
}

/// Output object produced by an execution
///
/// Created by the backend during a run; read-only here, never mutated
/// after creation, only deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionArtifact {
    pub id: String,
    pub execution_id: String,
    pub artifact_type: ArtifactType,
    pub name: String,
    /// Retrievable reference to the artifact content
    pub url: String,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Summary metrics derived from execution history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    pub total: usize,
    /// Percentage of completed executions, 0 when the history is empty
    pub success_rate: f64,
    /// Mean duration over executions that carry one, 0 when none qualify
    pub avg_duration_ms: f64,
}
