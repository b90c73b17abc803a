/// Execution Lifecycle
///
/// This module owns the orchestration contract around runs:
/// - Execution and artifact data models
/// - The ExecutionBackend trait (submit, status, history, artifacts) with
///   a reqwest HTTP implementation
/// - The run coordinator: submit-then-poll state machine with a fixed
///   cadence, a client-side attempt ceiling, and one live poll loop per
///   flow slot
/// - Stats aggregation over execution history

// Execution, artifact, and stats data models
pub mod types;

// Execution backend contract and HTTP client implementation
pub mod backend;

// Submit-and-poll run coordinator
pub mod coordinator;

// Pure stats reduction over execution history
pub mod stats;

pub use backend::{ExecutionBackend, HttpExecutionBackend};
pub use coordinator::{ExecutionCoordinator, RunHandle, RunState};
pub use stats::summarize;
pub use types::{
    ArtifactType, Execution, ExecutionArtifact, ExecutionStats, ExecutionStatus,
};
