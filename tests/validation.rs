//! Configuration validator scenarios: required fields, expression checks,
//! and flow-level aggregation with unknown types.
mod common;

use common::{flow_with, node};
use serde_json::json;

use flowdeck::catalog::{
    NodeCatalog, NodeCategory, NodeTypeDefinition, PropertyDescriptor, PropertyKind,
};
use flowdeck::validator::{validate_flow, validate_node, ValidationPurpose};

fn url_only_type() -> NodeTypeDefinition {
    NodeTypeDefinition {
        id: "fetch".to_string(),
        category: NodeCategory::Action,
        label: "Fetch".to_string(),
        color: "#888888".to_string(),
        description: String::new(),
        config_schema: vec![PropertyDescriptor::new(
            "url",
            "url",
            PropertyKind::Text,
            true,
        )],
        execute_input_schema: None,
    }
}

#[test]
fn missing_required_field_is_reported_by_label() {
    let def = url_only_type();
    let n = node("n1", "fetch", json!({}));

    let report = validate_node(&n, &def, ValidationPurpose::Configure);
    assert!(!report.is_ok());
    assert_eq!(report.missing_fields, vec!["url".to_string()]);
    assert!(report.invalid_expressions.is_empty());
}

#[test]
fn empty_string_counts_as_missing_but_zero_and_false_do_not() {
    let mut def = url_only_type();
    def.config_schema.push(
        PropertyDescriptor::new("retries", "Retries", PropertyKind::Number, true),
    );
    def.config_schema.push(
        PropertyDescriptor::new("verify", "Verify TLS", PropertyKind::Boolean, true),
    );

    let n = node("n1", "fetch", json!({"url": "", "retries": 0, "verify": false}));
    let report = validate_node(&n, &def, ValidationPurpose::Configure);

    assert_eq!(report.missing_fields, vec!["url".to_string()]);
}

#[test]
fn validator_is_deterministic_and_does_not_mutate() {
    let def = url_only_type();
    let n = node("n1", "fetch", json!({"url": "{{foo}}"}));
    let config_before = n.config.clone();

    let first = validate_node(&n, &def, ValidationPurpose::Configure);
    let second = validate_node(&n, &def, ValidationPurpose::Configure);

    assert_eq!(first, second);
    assert_eq!(n.config, config_before);
}

#[test]
fn malformed_expression_reported_as_key_expression() {
    let def = url_only_type();
    let n = node(
        "n1",
        "fetch",
        json!({"url": "https://x.test/{{foo}}/{{trigger.body.id}}"}),
    );

    let report = validate_node(&n, &def, ValidationPurpose::Configure);
    assert_eq!(report.invalid_expressions, vec!["url: {{foo}}".to_string()]);
}

#[test]
fn empty_schema_is_trivially_valid() {
    let catalog = NodeCatalog::with_builtin();
    let manual = catalog.lookup("manual").unwrap();
    let n = node("n1", "manual", json!({}));

    assert!(validate_node(&n, &manual, ValidationPurpose::Configure).is_ok());
}

#[test]
fn execute_purpose_uses_execution_input_schema() {
    let catalog = NodeCatalog::with_builtin();
    let def = catalog.lookup("ai-image-generator").unwrap();
    // aspectRatio is part of the config schema but not of the narrower
    // execute-input schema; only the prompt matters at submission time.
    let n = node("n1", "ai-image-generator", json!({"prompt": "a red fox"}));

    let report = validate_node(&n, &def, ValidationPurpose::Execute);
    assert!(report.is_ok());
}

#[test]
fn unknown_node_type_fails_closed() {
    let catalog = NodeCatalog::with_builtin();
    let flow = flow_with(vec![node("n1", "does-not-exist", json!({}))]);

    let report = validate_flow(&flow, &catalog, ValidationPurpose::Execute);
    assert!(!report.is_ok());
    assert_eq!(report.unknown_types.len(), 1);
    assert_eq!(report.unknown_types[0].type_id, "does-not-exist");
}

#[test]
fn valid_flow_passes_aggregate_validation() {
    let catalog = NodeCatalog::with_builtin();
    let flow = flow_with(vec![
        node("t1", "webhook", json!({"method": "POST", "path": "/in"})),
        node(
            "a1",
            "ai-chat",
            json!({"model": "gpt-4o-mini", "prompt": "Summarize {{trigger.body.text}}"}),
        ),
    ]);

    let report = validate_flow(&flow, &catalog, ValidationPurpose::Execute);
    assert!(report.is_ok(), "unexpected report: {:?}", report);
}
