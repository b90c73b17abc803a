/// Flow Graph Model
///
/// This module owns the flow data model and its mutations:
/// - Type definitions (Flow, FlowNode, Edge)
/// - Local graph edits (add/update/remove node, edges, version bumps)
/// - Structural validation (edge endpoints, cycle detection)
/// - SQLite persistence with sqlx
///
/// All mutations are local until an explicit persist step; the model holds
/// no network responsibility.

// Core flow type definitions
pub mod types;

// Local graph mutations and structural validation
pub mod model;

// SQLite persistence layer for flow storage
pub mod storage;

pub use storage::{FlowMetadata, FlowStorage};
pub use types::{Edge, Flow, FlowNode, FlowStatus, Position};
