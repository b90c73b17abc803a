/// Local flow graph mutations and structural validation
///
/// Mutations follow the editor contract: adding a node seeds its config
/// from the catalog schema defaults, config patches are shallow
/// last-write-wins merges, and removing a node also removes the edges that
/// reference it. Structural validation builds a petgraph DiGraph to check
/// edge endpoints and reject cycles.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::catalog::NodeTypeDefinition;
use crate::error::FlowdeckError;
use crate::flow::types::{Edge, Flow, FlowNode, Position};

impl Flow {
    /// Add a node instantiating the given catalog type
    ///
    /// Assigns a fresh id and seeds the config with the schema defaults.
    /// Structural change: bumps the flow version. Returns the new node id.
    pub fn add_node(&mut self, def: &NodeTypeDefinition, position: Position) -> String {
        let mut config = Map::new();
        for prop in &def.config_schema {
            if let Some(default) = &prop.default {
                config.insert(prop.name.clone(), default.clone());
            }
        }

        let node = FlowNode {
            id: format!("{}-{}", def.id, Uuid::new_v4().simple()),
            type_id: def.id.clone(),
            config,
            position,
        };
        let node_id = node.id.clone();

        tracing::debug!("Added node '{}' (type: {}) to flow '{}'", node_id, def.id, self.id);

        self.nodes.push(node);
        self.version += 1;
        node_id
    }

    /// Merge a configuration patch into a node
    ///
    /// Last-write-wins per key; no deep merge across unrelated keys.
    /// Not a structural change, so the version is untouched.
    pub fn update_node_config(
        &mut self,
        node_id: &str,
        patch: Map<String, Value>,
    ) -> Result<FlowNode, FlowdeckError> {
        let node = self
            .node_mut(node_id)
            .ok_or_else(|| FlowdeckError::NodeNotFound(node_id.to_string()))?;

        for (key, value) in patch {
            node.config.insert(key, value);
        }

        Ok(node.clone())
    }

    /// Remove a node and every edge referencing it
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), FlowdeckError> {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != node_id);
        if self.nodes.len() == before {
            return Err(FlowdeckError::NodeNotFound(node_id.to_string()));
        }

        self.edges.retain(|e| e.from != node_id && e.to != node_id);
        self.version += 1;
        tracing::debug!("Removed node '{}' from flow '{}'", node_id, self.id);
        Ok(())
    }

    /// Connect two existing nodes
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), FlowdeckError> {
        for endpoint in [from, to] {
            if self.node(endpoint).is_none() {
                return Err(FlowdeckError::InvalidStructure(format!(
                    "edge references unknown node: {}",
                    endpoint
                )));
            }
        }

        let edge = Edge {
            from: from.to_string(),
            to: to.to_string(),
        };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
            self.version += 1;
        }
        Ok(())
    }

    /// Validate graph structure: edge endpoints must exist, no cycles
    ///
    /// Builds a petgraph DiGraph and topologically sorts it. An unresolved
    /// edge endpoint or a cycle is an InvalidStructure error, not a crash.
    pub fn validate_structure(&self) -> Result<(), FlowdeckError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.id.as_str());
            index.insert(node.id.as_str(), idx);
        }

        for edge in &self.edges {
            let from = index.get(edge.from.as_str()).ok_or_else(|| {
                FlowdeckError::InvalidStructure(format!(
                    "edge references unknown node: {}",
                    edge.from
                ))
            })?;
            let to = index.get(edge.to.as_str()).ok_or_else(|| {
                FlowdeckError::InvalidStructure(format!(
                    "edge references unknown node: {}",
                    edge.to
                ))
            })?;
            graph.add_edge(*from, *to, ());
        }

        toposort(&graph, None).map_err(|_| {
            FlowdeckError::InvalidStructure("flow contains cycles - must be a DAG".to_string())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeCatalog;
    use serde_json::json;

    fn webhook_def() -> NodeTypeDefinition {
        NodeCatalog::with_builtin().lookup("webhook").unwrap()
    }

    #[test]
    fn add_node_seeds_schema_defaults() {
        let mut flow = Flow::new("f1", "Test");
        let node_id = flow.add_node(&webhook_def(), Position::default());

        let node = flow.node(&node_id).unwrap();
        assert_eq!(node.type_id, "webhook");
        // method has a default, path does not
        assert_eq!(node.config.get("method"), Some(&json!("POST")));
        assert!(node.config.get("path").is_none());
        assert_eq!(flow.version, 2);
    }

    #[test]
    fn config_patch_is_shallow_last_write_wins() {
        let mut flow = Flow::new("f1", "Test");
        let node_id = flow.add_node(&webhook_def(), Position::default());

        let mut patch = Map::new();
        patch.insert("path".to_string(), json!("/hook"));
        patch.insert("method".to_string(), json!("PUT"));
        flow.update_node_config(&node_id, patch).unwrap();

        let version_before = flow.version;
        let mut patch2 = Map::new();
        patch2.insert("path".to_string(), json!("/hook2"));
        let node = flow.update_node_config(&node_id, patch2).unwrap();

        assert_eq!(node.config.get("path"), Some(&json!("/hook2")));
        // Unrelated key survives the second patch
        assert_eq!(node.config.get("method"), Some(&json!("PUT")));
        // Config edits are not structural
        assert_eq!(flow.version, version_before);
    }

    #[test]
    fn remove_node_drops_referencing_edges() {
        let mut flow = Flow::new("f1", "Test");
        let def = webhook_def();
        let a = flow.add_node(&def, Position::default());
        let b = flow.add_node(&def, Position::default());
        let c = flow.add_node(&def, Position::default());
        flow.add_edge(&a, &b).unwrap();
        flow.add_edge(&b, &c).unwrap();

        flow.remove_node(&b).unwrap();
        assert!(flow.edges.is_empty());
        assert_eq!(flow.nodes.len(), 2);
    }

    #[test]
    fn cycle_detection() {
        let mut flow = Flow::new("f1", "Test");
        let def = webhook_def();
        let a = flow.add_node(&def, Position::default());
        let b = flow.add_node(&def, Position::default());
        flow.add_edge(&a, &b).unwrap();
        flow.add_edge(&b, &a).unwrap();

        let err = flow.validate_structure().unwrap_err();
        assert!(matches!(err, FlowdeckError::InvalidStructure(_)));
    }

    #[test]
    fn dangling_edge_is_invalid() {
        let mut flow = Flow::new("f1", "Test");
        let a = flow.add_node(&webhook_def(), Position::default());
        // Bypass add_edge's endpoint check to simulate a corrupt definition
        flow.edges.push(Edge {
            from: a,
            to: "ghost".to_string(),
        });

        assert!(flow.validate_structure().is_err());
    }
}
