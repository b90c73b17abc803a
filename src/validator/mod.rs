/// Configuration Validator
///
/// Pure read-only checks gating "test configuration" and "submit for
/// execution" actions. Produces per-field reports - missing required
/// fields by label, malformed expressions as `key: expression` - never a
/// single opaque message. Validation never mutates node state.

use serde::Serialize;
use serde_json::Value;

use crate::binding::expression::{extract_expressions, is_well_formed};
use crate::catalog::{NodeCatalog, NodeTypeDefinition, PropertyDescriptor};
use crate::flow::types::{Flow, FlowNode};

/// Which schema a validation run checks against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPurpose {
    /// Editing-time check against the configuration schema
    Configure,
    /// Pre-submission check against the execution-input schema
    /// (falls back to the configuration schema when none is declared)
    Execute,
}

/// Per-node validation report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Labels of required properties that are unset or empty strings
    pub missing_fields: Vec<String>,
    /// Malformed expressions, reported as "key: expression"
    pub invalid_expressions: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.missing_fields.is_empty() && self.invalid_expressions.is_empty()
    }
}

/// Flow-level validation outcome, aggregated per node
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowValidationReport {
    /// Nodes whose type id did not resolve in the catalog
    pub unknown_types: Vec<UnknownTypeEntry>,
    /// Nodes with missing fields or malformed expressions
    pub node_reports: Vec<NodeReportEntry>,
    /// Structural problems (dangling edges, cycles)
    pub structure_errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownTypeEntry {
    pub node_id: String,
    pub type_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReportEntry {
    pub node_id: String,
    pub report: ValidationReport,
}

impl FlowValidationReport {
    pub fn is_ok(&self) -> bool {
        self.unknown_types.is_empty()
            && self.node_reports.is_empty()
            && self.structure_errors.is_empty()
    }
}

/// Validate one node against its type definition
///
/// 1. Every required property whose configured value is unset or an empty
///    string contributes its label to `missing_fields`. Any other value -
///    including `0` and `false` - counts as set.
/// 2. Every `{{...}}` candidate in a string-valued entry is checked for
///    well-formedness; failures are recorded as `key: expression`.
///
/// An empty schema is not an error: a node with no declared configuration
/// is trivially valid.
pub fn validate_node(
    node: &FlowNode,
    def: &NodeTypeDefinition,
    purpose: ValidationPurpose,
) -> ValidationReport {
    let schema: &[PropertyDescriptor] = match purpose {
        ValidationPurpose::Configure => &def.config_schema,
        ValidationPurpose::Execute => def.execution_schema(),
    };

    let mut report = ValidationReport::default();

    for prop in schema {
        if !prop.required {
            continue;
        }
        let missing = match node.config.get(&prop.name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            report.missing_fields.push(prop.label.clone());
        }
    }

    for (key, value) in &node.config {
        if let Value::String(s) = value {
            for expr in extract_expressions(s) {
                if !is_well_formed(expr) {
                    report.invalid_expressions.push(format!("{}: {}", key, expr));
                }
            }
        }
    }

    report
}

/// Validate a whole flow ahead of submission
///
/// Resolves every node's type through the catalog - an absent type id
/// fails closed as an unknown-type entry rather than being skipped - then
/// runs the per-node check and the structural check.
pub fn validate_flow(
    flow: &Flow,
    catalog: &NodeCatalog,
    purpose: ValidationPurpose,
) -> FlowValidationReport {
    let mut result = FlowValidationReport::default();

    for node in &flow.nodes {
        match catalog.lookup(&node.type_id) {
            Ok(def) => {
                let report = validate_node(node, &def, purpose);
                if !report.is_ok() {
                    result.node_reports.push(NodeReportEntry {
                        node_id: node.id.clone(),
                        report,
                    });
                }
            }
            Err(_) => {
                result.unknown_types.push(UnknownTypeEntry {
                    node_id: node.id.clone(),
                    type_id: node.type_id.clone(),
                });
            }
        }
    }

    if let Err(e) = flow.validate_structure() {
        result.structure_errors.push(e.to_string());
    }

    result
}
