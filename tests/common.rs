//! Shared builders for integration tests.

use chrono::Utc;
use serde_json::Value;

use flowdeck::execution::{Execution, ExecutionStatus};
use flowdeck::flow::{Flow, FlowNode, Position};

#[allow(dead_code)]
pub fn node(id: &str, type_id: &str, config: Value) -> FlowNode {
    let Value::Object(config) = config else {
        panic!("config must be a JSON object");
    };
    FlowNode {
        id: id.to_string(),
        type_id: type_id.to_string(),
        config,
        position: Position::default(),
    }
}

#[allow(dead_code)]
pub fn flow_with(nodes: Vec<FlowNode>) -> Flow {
    let mut flow = Flow::new("flow-test", "Test Flow");
    flow.nodes = nodes;
    flow
}

#[allow(dead_code)]
pub fn execution(id: &str, status: ExecutionStatus, duration_ms: Option<u64>) -> Execution {
    Execution {
        id: id.to_string(),
        flow_id: "flow-test".to_string(),
        status,
        started_at: Utc::now(),
        completed_at: None,
        duration_ms,
        error_message: None,
        output: None,
        total_nodes: 3,
        completed_nodes: if status.is_terminal() { 3 } else { 1 },
    }
}
