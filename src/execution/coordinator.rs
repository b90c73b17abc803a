/// Submit-and-poll run coordinator
///
/// State machine per run: idle -> submitted -> polling -> one of
/// {completed, failed, timed-out}. A submission error is reported directly
/// to the caller and never produces a handle - distinct from an execution
/// that starts and later fails.
///
/// Polling runs on a fixed cadence with a fixed attempt ceiling, enforced
/// client-side as a safety net independent of any server-side timeout.
/// Polls for one execution are strictly sequential: the next tick waits
/// for the prior response. Each flow has one run slot; starting a new run
/// tears down the slot's previous poll loop before submitting, and
/// claiming the slot aborts any loop it displaces, so two timers never
/// race to update the same observed status. A loop that reaches a
/// terminal state clears its own slot entry.

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use serde_json::{Map, Value};

use crate::config::EngineConfig;
use crate::error::FlowdeckError;
use crate::execution::backend::ExecutionBackend;
use crate::execution::types::{Execution, ExecutionStatus};

/// Observable state of one coordinated run
#[derive(Debug, Clone)]
pub enum RunState {
    /// Submission accepted; first poll not yet issued
    Submitted,
    /// Still pending/running after the given poll attempt
    Polling { attempt: u32 },
    /// Backend reported terminal success
    Completed { execution: Execution },
    /// Backend reported terminal failure, or a poll transport error.
    /// The message is passed through verbatim.
    Failed { message: String },
    /// Attempt ceiling exhausted while still pending/running. The run may
    /// still finish on the backend; this only reflects that the client
    /// stopped watching.
    TimedOut,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed { .. } | RunState::Failed { .. } | RunState::TimedOut
        )
    }

    /// Fold a terminal state into the domain error taxonomy
    ///
    /// Non-terminal states are still in flight and yield None.
    pub fn outcome(self) -> Option<Result<Execution, FlowdeckError>> {
        match self {
            RunState::Completed { execution } => Some(Ok(execution)),
            RunState::Failed { message } => Some(Err(FlowdeckError::ExecutionFailed(message))),
            RunState::TimedOut => Some(Err(FlowdeckError::PollingTimeout)),
            RunState::Submitted | RunState::Polling { .. } => None,
        }
    }
}

/// Handle to a coordinated run
///
/// Exposes the execution id and a watch channel of state transitions.
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub execution_id: String,
    rx: watch::Receiver<RunState>,
}

impl RunHandle {
    /// Current state (non-blocking)
    pub fn state(&self) -> RunState {
        self.rx.borrow().clone()
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.rx.clone()
    }

    /// Block until the run reaches a terminal state
    pub async fn wait(&self) -> RunState {
        let mut rx = self.rx.clone();
        loop {
            let state = rx.borrow().clone();
            if state.is_terminal() {
                return state;
            }
            if rx.changed().await.is_err() {
                return rx.borrow().clone();
            }
        }
    }
}

/// One flow slot's live poll loop
struct RunSlot {
    execution_id: String,
    task: JoinHandle<()>,
}

/// Coordinates run submission and status polling
///
/// Holds one active poll task per flow id. The coordinator is read-only
/// with respect to execution records; it only initiates runs and observes
/// them.
pub struct ExecutionCoordinator {
    backend: Arc<dyn ExecutionBackend>,
    poll_interval: Duration,
    max_attempts: u32,
    slots: Arc<Mutex<HashMap<String, RunSlot>>>,
}

impl ExecutionCoordinator {
    pub fn new(backend: Arc<dyn ExecutionBackend>, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            backend,
            poll_interval,
            max_attempts,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(backend: Arc<dyn ExecutionBackend>, config: &EngineConfig) -> Self {
        Self::new(backend, config.poll_interval(), config.poll_max_attempts)
    }

    /// Start a run for a flow and begin polling its status
    ///
    /// Tears down any previous poll loop for the same flow slot first.
    /// Submission failure is returned directly; no handle is produced.
    pub async fn start(
        &self,
        flow_id: &str,
        per_node_input: Map<String, Value>,
    ) -> Result<RunHandle, FlowdeckError> {
        self.stop(flow_id).await;

        let execution_id = self
            .backend
            .submit_execution(flow_id, &per_node_input)
            .await?;

        tracing::info!(
            "Execution {} started for flow {}, polling every {:?} (max {} attempts)",
            execution_id,
            flow_id,
            self.poll_interval,
            self.max_attempts
        );

        let (tx, rx) = watch::channel(RunState::Submitted);
        let backend = Arc::clone(&self.backend);
        let interval = self.poll_interval;
        let max_attempts = self.max_attempts;
        let poll_id = execution_id.clone();
        let slot_key = flow_id.to_string();
        let slots = Arc::clone(&self.slots);

        let task = tokio::spawn(async move {
            poll_until_terminal(backend, poll_id.clone(), tx, interval, max_attempts).await;

            // Clear the finished loop's slot entry, unless a newer run has
            // already claimed the slot
            let mut slots = slots.lock().await;
            if slots
                .get(&slot_key)
                .is_some_and(|slot| slot.execution_id == poll_id)
            {
                slots.remove(&slot_key);
            }
        });

        let slot = RunSlot {
            execution_id: execution_id.clone(),
            task,
        };
        // Two starts for the same flow can both pass stop() while their
        // submissions are in flight; whoever claims the slot second must
        // abort the loop it displaces, or both keep polling.
        if let Some(previous) = self.slots.lock().await.insert(flow_id.to_string(), slot) {
            previous.task.abort();
            tracing::debug!(
                "Replaced in-flight poll loop for flow {} (execution {})",
                flow_id,
                previous.execution_id
            );
        }

        Ok(RunHandle { execution_id, rx })
    }

    /// Tear down the active poll loop for a flow slot, if any
    ///
    /// Clearing the slot does not cancel the run on the backend.
    pub async fn stop(&self, flow_id: &str) {
        let mut slots = self.slots.lock().await;
        if let Some(previous) = slots.remove(flow_id) {
            previous.task.abort();
            tracing::debug!("Stopped previous poll loop for flow {}", flow_id);
        }
    }

    /// Number of flow slots with a live poll loop
    pub async fn active_slots(&self) -> usize {
        self.slots.lock().await.len()
    }
}

/// The poll loop: fixed cadence, sequential requests, attempt ceiling
///
/// Fail-fast on transport errors, fail-slow on business pending-state.
async fn poll_until_terminal(
    backend: Arc<dyn ExecutionBackend>,
    execution_id: String,
    tx: watch::Sender<RunState>,
    interval: Duration,
    max_attempts: u32,
) {
    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;

        match backend.get_execution(&execution_id).await {
            Ok(execution) => match execution.status {
                ExecutionStatus::Completed => {
                    tracing::info!("Execution {} completed", execution_id);
                    let _ = tx.send(RunState::Completed { execution });
                    return;
                }
                ExecutionStatus::Failed => {
                    let message = execution
                        .error_message
                        .unwrap_or_else(|| "Execution failed".to_string());
                    tracing::warn!("Execution {} failed: {}", execution_id, message);
                    let _ = tx.send(RunState::Failed { message });
                    return;
                }
                ExecutionStatus::Pending | ExecutionStatus::Running => {
                    let _ = tx.send(RunState::Polling { attempt });
                }
            },
            Err(e) => {
                // A failed poll request stops the loop immediately rather
                // than retrying indefinitely.
                tracing::warn!("Poll for execution {} errored: {}", execution_id, e);
                let _ = tx.send(RunState::Failed {
                    message: e.to_string(),
                });
                return;
            }
        }
    }

    tracing::warn!(
        "Execution {} still not terminal after {} polls, giving up",
        execution_id,
        max_attempts
    );
    let _ = tx.send(RunState::TimedOut);
}
