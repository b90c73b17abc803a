/// Flowdeck: workflow execution subsystem for node-based automations
///
/// This library provides the orchestration contract around user-authored
/// workflow graphs: a versioned node-type catalog, the flow graph model with
/// persistence, per-node configuration validation, trigger-variable binding,
/// and the execution lifecycle coordinator that tracks asynchronous runs.

// Core configuration and setup
pub mod config;

// Domain error taxonomy - every failure state is representable, nothing is fatal
pub mod error;

// Node catalog - versioned, swap-on-refresh registry of node type definitions
pub mod catalog;

// Flow graph model - nodes, edges, local mutations, and SQLite persistence
pub mod flow;

// Trigger variable binding - {{trigger.body.x}} extraction and payload shaping
pub mod binding;

// Configuration validation - missing-field and expression reports
pub mod validator;

// Execution lifecycle - backend contract, run coordinator, stats aggregation
pub mod execution;

// HTTP API layer - REST endpoints for catalog, flows, and executions
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use catalog::{NodeCatalog, NodeCategory, NodeTypeDefinition, PropertyDescriptor};
pub use error::FlowdeckError;
pub use execution::{Execution, ExecutionCoordinator, ExecutionStatus, RunHandle, RunState};
pub use flow::{Edge, Flow, FlowNode, FlowStatus};
pub use server::start_server;
