/// Trigger field collection and submission-payload shaping
///
/// Downstream execution expects trigger-originated runtime values isolated
/// under a conventional `body` envelope, so the backend can distinguish
/// design-time configuration from values supplied by the invoking event.
/// The binder discovers which fields those are by scanning every node's
/// configuration, then reshapes only the trigger nodes that reference at
/// least one of them.

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};

use crate::binding::expression::trigger_fields_in;
use crate::catalog::NodeCatalog;
use crate::flow::types::{Flow, FlowNode};

/// Collect the deduplicated set of trigger field names referenced anywhere
/// in the flow's node configurations
///
/// Walks configuration values recursively through nested objects and
/// arrays. Repeated references to the same field collapse into one entry.
pub fn collect_trigger_fields(flow: &Flow) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    for node in &flow.nodes {
        for value in node.config.values() {
            walk(value, &mut fields);
        }
    }
    fields
}

fn walk(value: &Value, fields: &mut BTreeSet<String>) {
    match value {
        Value::String(s) => fields.extend(trigger_fields_in(s)),
        Value::Object(map) => {
            for v in map.values() {
                walk(v, fields);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk(v, fields);
            }
        }
        _ => {}
    }
}

/// Shape the per-node submission payload for a run
///
/// For each node, the effective input is the stored configuration
/// shallow-merged with the caller's override map (overrides win). Trigger
/// nodes whose effective input contains at least one collected trigger
/// field get their input partitioned: trigger-origin keys nest under
/// `body`, everything else stays top-level. All other nodes pass through
/// unchanged. Nodes with no effective input are omitted.
pub fn prepare_submission(
    flow: &Flow,
    catalog: &NodeCatalog,
    overrides: &HashMap<String, Map<String, Value>>,
) -> Map<String, Value> {
    let trigger_fields = collect_trigger_fields(flow);
    let mut per_node_input = Map::new();

    for node in &flow.nodes {
        let effective = effective_config(node, overrides.get(&node.id));
        if effective.is_empty() {
            continue;
        }

        let is_trigger = catalog
            .lookup(&node.type_id)
            .map(|def| def.is_trigger())
            .unwrap_or(false);

        let references_trigger = effective.keys().any(|k| trigger_fields.contains(k));

        let input = if is_trigger && references_trigger {
            let mut body_params = Map::new();
            let mut other_params = Map::new();
            for (key, val) in effective {
                if trigger_fields.contains(&key) {
                    body_params.insert(key, val);
                } else {
                    other_params.insert(key, val);
                }
            }
            other_params.insert("body".to_string(), Value::Object(body_params));
            Value::Object(other_params)
        } else {
            Value::Object(effective)
        };

        per_node_input.insert(node.id.clone(), input);
    }

    per_node_input
}

/// Stored config shallow-merged with the caller's per-node overrides
fn effective_config(
    node: &FlowNode,
    overrides: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut merged = node.config.clone();
    if let Some(patch) = overrides {
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
