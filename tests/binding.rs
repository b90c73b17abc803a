//! Expression grammar and end-to-end payload shaping scenarios.
mod common;

use common::{flow_with, node};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use flowdeck::binding::{
    collect_trigger_fields, extract_expressions, is_well_formed, prepare_submission,
    trigger_fields_in,
};
use flowdeck::catalog::NodeCatalog;

#[test]
fn extracts_every_expression_occurrence() {
    let found = extract_expressions(
        "Send to {{trigger.body.email}}, cc {{config.admin}}, re {{trigger.body.email}}",
    );
    assert_eq!(
        found,
        vec![
            "{{trigger.body.email}}",
            "{{config.admin}}",
            "{{trigger.body.email}}"
        ]
    );
}

#[test]
fn trigger_fields_only_match_the_trigger_body_prefix() {
    let fields: Vec<String> = trigger_fields_in(
        "{{trigger.body.email}} {{trigger.headers.auth}} {{config.email}} {{trigger.body.user_id}}",
    )
    .collect();
    assert_eq!(fields, vec!["email".to_string(), "user_id".to_string()]);
}

#[test]
fn well_formedness_accepts_dotted_paths_and_dollar_roots() {
    assert!(is_well_formed("{{trigger.body.email}}"));
    assert!(is_well_formed("{{node.output}}"));
    assert!(is_well_formed("{{$input}}"));

    assert!(!is_well_formed("{{foo}}"));
    assert!(!is_well_formed("{{}}"));
    assert!(!is_well_formed("plain text"));
}

#[test]
fn field_collection_walks_nested_values() {
    let flow = flow_with(vec![node(
        "a1",
        "ai-chat",
        json!({
            "prompt": "Hello {{trigger.body.name}}",
            "meta": {"cc": ["{{trigger.body.email}}"]}
        }),
    )]);

    let fields = collect_trigger_fields(&flow);
    assert_eq!(
        fields.into_iter().collect::<Vec<_>>(),
        vec!["email".to_string(), "name".to_string()]
    );
}

#[test]
fn override_values_land_inside_the_body_envelope() {
    // The downstream node's reference to {{trigger.body.email}} marks
    // "email" as trigger-originated; the runtime value supplied at
    // submission time must arrive nested under body on the trigger node.
    let flow = flow_with(vec![
        node("t1", "webhook", json!({"email": "", "path": "/in"})),
        node(
            "a1",
            "ai-chat",
            json!({"prompt": "Write to {{trigger.body.email}}"}),
        ),
    ]);
    let catalog = NodeCatalog::with_builtin();

    let mut overrides = HashMap::new();
    let mut patch = Map::new();
    patch.insert("email".to_string(), json!("someone@example.com"));
    overrides.insert("t1".to_string(), patch);

    let input = prepare_submission(&flow, &catalog, &overrides);
    assert_eq!(
        input.get("t1"),
        Some(&json!({
            "path": "/in",
            "body": {"email": "someone@example.com"}
        }))
    );
}

#[test]
fn nodes_with_no_effective_input_are_omitted() {
    let flow = flow_with(vec![
        node("m1", "manual", json!({})),
        node("a1", "ai-chat", json!({"prompt": "hi"})),
    ]);
    let catalog = NodeCatalog::with_builtin();

    let input = prepare_submission(&flow, &catalog, &HashMap::new());
    assert!(!input.contains_key("m1"));
    assert_eq!(input.get("a1"), Some(&json!({"prompt": "hi"})));
}

#[test]
fn unknown_node_types_pass_through_without_reshaping() {
    let flow = flow_with(vec![node(
        "x1",
        "not-in-catalog",
        json!({"email": "{{trigger.body.email}}"}),
    )]);
    let catalog = NodeCatalog::with_builtin();

    let input = prepare_submission(&flow, &catalog, &HashMap::new());
    assert_eq!(
        input.get("x1"),
        Some(&json!({"email": "{{trigger.body.email}}"}))
    );
}

#[test]
fn shaping_is_stable_across_repeated_runs() {
    let flow = flow_with(vec![
        node(
            "t1",
            "webhook",
            json!({"email": "{{trigger.body.email}}", "path": "/in"}),
        ),
        node(
            "a1",
            "ai-chat",
            json!({"prompt": "Write to {{trigger.body.email}}"}),
        ),
    ]);
    let catalog = NodeCatalog::with_builtin();
    let overrides = HashMap::new();

    let first = prepare_submission(&flow, &catalog, &overrides);
    let second = prepare_submission(&flow, &catalog, &overrides);
    let third = prepare_submission(&flow, &catalog, &overrides);
    assert_eq!(first, second);
    assert_eq!(second, third);
}
