/// Core flow type definitions
///
/// The fundamental structures for flows, nodes, and edges. These types are
/// serialized to JSON both for persistence and for the REST surface, using
/// the camelCase names the surrounding UI expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle status of a flow definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Draft,
    Published,
    Archived,
}

/// Canvas position of a node - presentation only, never affects execution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One configured vertex in a flow
///
/// References a catalog node type and carries the per-property configuration
/// map. String values may contain template expressions such as
/// `{{trigger.body.email}}` that are bound at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Unique node identifier within the flow
    pub id: String,
    /// Catalog type id this node instantiates
    pub type_id: String,
    /// Property name -> configured value
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub position: Position,
}

/// Directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub from: String,
    /// Target node id
    pub to: String,
}

/// A complete flow definition: ordered nodes plus their connections
///
/// Invariant: every edge references two node ids present in the node set.
/// The version is a monotonic integer bumped on every structural change
/// (node or edge added/removed); configuration edits do not bump it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<Edge>,
    pub status: FlowStatus,
    pub version: u64,
}

impl Flow {
    /// Create an empty draft flow
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            status: FlowStatus::Draft,
            version: 1,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }
}
