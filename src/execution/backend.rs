/// Execution backend contract and HTTP client implementation
///
/// The backend actually runs flows and owns the execution records; this
/// subsystem talks to it through a narrow trait so the coordinator can be
/// exercised against mocks. The HTTP implementation targets the platform's
/// REST surface with reqwest.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FlowdeckError;
use crate::execution::types::{Execution, ExecutionArtifact};

/// Narrow contract to the execution backend and artifact store
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Submit a run; returns the backend-assigned execution id.
    /// Errors here mean the run was never created (SubmissionFailed).
    async fn submit_execution(
        &self,
        flow_id: &str,
        per_node_input: &Map<String, Value>,
    ) -> Result<String, FlowdeckError>;

    /// Fetch the current execution record by id
    async fn get_execution(&self, execution_id: &str) -> Result<Execution, FlowdeckError>;

    /// Most recent executions for a flow, newest first
    async fn list_executions(
        &self,
        flow_id: &str,
        limit: u32,
    ) -> Result<Vec<Execution>, FlowdeckError>;

    /// Artifacts produced by an execution
    async fn list_artifacts(
        &self,
        execution_id: &str,
    ) -> Result<Vec<ExecutionArtifact>, FlowdeckError>;

    /// Delete a single artifact
    async fn delete_artifact(&self, artifact_id: &str) -> Result<(), FlowdeckError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    execution_id: String,
}

/// HTTP client for the platform execution backend
pub struct HttpExecutionBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExecutionBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ExecutionBackend for HttpExecutionBackend {
    async fn submit_execution(
        &self,
        flow_id: &str,
        per_node_input: &Map<String, Value>,
    ) -> Result<String, FlowdeckError> {
        let response = self
            .client
            .post(self.url(&format!("/flows/{}/execute", flow_id)))
            .json(per_node_input)
            .send()
            .await
            .map_err(|e| FlowdeckError::SubmissionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FlowdeckError::SubmissionFailed(format!(
                "backend rejected submission ({}): {}",
                status, body
            )));
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| FlowdeckError::SubmissionFailed(e.to_string()))?;

        tracing::info!(
            "Submitted execution {} for flow {}",
            submitted.execution_id,
            flow_id
        );
        Ok(submitted.execution_id)
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Execution, FlowdeckError> {
        let response = self
            .client
            .get(self.url(&format!("/executions/{}", execution_id)))
            .send()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlowdeckError::BackendUnavailable(format!(
                "status fetch failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))
    }

    async fn list_executions(
        &self,
        flow_id: &str,
        limit: u32,
    ) -> Result<Vec<Execution>, FlowdeckError> {
        let response = self
            .client
            .get(self.url(&format!("/flows/{}/executions", flow_id)))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlowdeckError::BackendUnavailable(format!(
                "history fetch failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))
    }

    async fn list_artifacts(
        &self,
        execution_id: &str,
    ) -> Result<Vec<ExecutionArtifact>, FlowdeckError> {
        let response = self
            .client
            .get(self.url(&format!("/executions/{}/artifacts", execution_id)))
            .send()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlowdeckError::BackendUnavailable(format!(
                "artifact fetch failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))
    }

    async fn delete_artifact(&self, artifact_id: &str) -> Result<(), FlowdeckError> {
        let response = self
            .client
            .delete(self.url(&format!("/artifacts/{}", artifact_id)))
            .send()
            .await
            .map_err(|e| FlowdeckError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlowdeckError::BackendUnavailable(format!(
                "artifact delete failed: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
