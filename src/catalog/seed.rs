/// Builtin node type definitions
///
/// The default catalog content: trigger, action, and AI node types with
/// their configuration schemas. A deployment may replace these wholesale by
/// refreshing the catalog from another source; there are no partial updates.

use serde_json::json;

use crate::catalog::types::{
    NodeCategory, NodeTypeDefinition, PropertyDescriptor, PropertyKind,
};

/// The builtin node type set, in palette order
pub fn builtin_node_types() -> Vec<NodeTypeDefinition> {
    vec![
        // Triggers
        NodeTypeDefinition {
            id: "webhook".to_string(),
            category: NodeCategory::Trigger,
            label: "Webhook".to_string(),
            color: "#4CAF50".to_string(),
            description: "Trigger workflow from HTTP webhook".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("method", "HTTP Method", PropertyKind::Select, true)
                    .with_options(&["GET", "POST", "PUT", "DELETE", "PATCH"])
                    .with_default(json!("POST")),
                PropertyDescriptor::new("path", "Webhook Path", PropertyKind::Text, true),
            ],
            execute_input_schema: None,
        },
        NodeTypeDefinition {
            id: "schedule".to_string(),
            category: NodeCategory::Trigger,
            label: "Schedule".to_string(),
            color: "#FF9800".to_string(),
            description: "Trigger workflow on schedule".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("interval", "Interval Type", PropertyKind::Select, true)
                    .with_options(&["cron", "interval", "once"])
                    .with_default(json!("interval")),
                PropertyDescriptor::new("cronExpression", "Cron Expression", PropertyKind::Text, false),
                PropertyDescriptor::new("intervalValue", "Interval (minutes)", PropertyKind::Number, false)
                    .with_default(json!(60)),
            ],
            execute_input_schema: None,
        },
        NodeTypeDefinition {
            id: "manual".to_string(),
            category: NodeCategory::Trigger,
            label: "Manual Trigger".to_string(),
            color: "#2196F3".to_string(),
            description: "Manually trigger workflow".to_string(),
            config_schema: vec![],
            execute_input_schema: None,
        },
        // Actions
        NodeTypeDefinition {
            id: "api-connector".to_string(),
            category: NodeCategory::Action,
            label: "API Connector".to_string(),
            color: "#9C27B0".to_string(),
            description: "Call an external HTTP API".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("url", "Request URL", PropertyKind::Text, true),
                PropertyDescriptor::new("method", "HTTP Method", PropertyKind::Select, true)
                    .with_options(&["GET", "POST", "PUT", "DELETE", "PATCH"])
                    .with_default(json!("GET")),
                PropertyDescriptor::new("headers", "Headers", PropertyKind::Json, false),
                PropertyDescriptor::new("body", "Request Body", PropertyKind::Textarea, false),
            ],
            execute_input_schema: None,
        },
        NodeTypeDefinition {
            id: "image-upload".to_string(),
            category: NodeCategory::Action,
            label: "Image Upload".to_string(),
            color: "#4CAF50".to_string(),
            description: "Upload image files".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("images", "Select Images", PropertyKind::Files, true)
                    .with_accept("image/*"),
            ],
            execute_input_schema: None,
        },
        NodeTypeDefinition {
            id: "multi-social-post".to_string(),
            category: NodeCategory::Action,
            label: "Multi Social Post".to_string(),
            color: "#E91E63".to_string(),
            description: "Publish content to multiple social channels".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("channels", "Channels", PropertyKind::Json, true),
                PropertyDescriptor::new("caption", "Caption", PropertyKind::Textarea, true),
                PropertyDescriptor::new("media", "Media", PropertyKind::Files, false)
                    .with_accept("image/*,video/*"),
            ],
            execute_input_schema: None,
        },
        // AI
        NodeTypeDefinition {
            id: "ai-chat".to_string(),
            category: NodeCategory::Ai,
            label: "AI Chat".to_string(),
            color: "#00BCD4".to_string(),
            description: "Generate a chat completion".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("model", "Model", PropertyKind::Select, true)
                    .with_options(&["gpt-4o", "gpt-4o-mini", "claude-3-5-sonnet"])
                    .with_default(json!("gpt-4o-mini")),
                PropertyDescriptor::new("systemPrompt", "System Prompt", PropertyKind::Textarea, false),
                PropertyDescriptor::new("prompt", "Prompt", PropertyKind::Textarea, true),
                PropertyDescriptor::new("temperature", "Temperature", PropertyKind::Number, false)
                    .with_default(json!(0.7)),
            ],
            execute_input_schema: None,
        },
        NodeTypeDefinition {
            id: "ai-image-generator".to_string(),
            category: NodeCategory::Ai,
            label: "AI Image Generator".to_string(),
            color: "#673AB7".to_string(),
            description: "Generate images from a prompt".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("prompt", "Prompt", PropertyKind::Textarea, true),
                PropertyDescriptor::new("aspectRatio", "Aspect Ratio", PropertyKind::Select, false)
                    .with_options(&["1:1", "16:9", "9:16"])
                    .with_default(json!("1:1")),
                PropertyDescriptor::new("referenceImage", "Reference Image", PropertyKind::File, false)
                    .with_accept("image/*"),
            ],
            // At submission time only the prompt can still be supplied;
            // the rest must already be configured on the node.
            execute_input_schema: Some(vec![PropertyDescriptor::new(
                "prompt",
                "Prompt",
                PropertyKind::Textarea,
                true,
            )]),
        },
        // Logic
        NodeTypeDefinition {
            id: "response-handler".to_string(),
            category: NodeCategory::Logic,
            label: "Response Handler".to_string(),
            color: "#607D8B".to_string(),
            description: "Shape the final response payload".to_string(),
            config_schema: vec![
                PropertyDescriptor::new("template", "Response Template", PropertyKind::Textarea, true),
                PropertyDescriptor::new("statusCode", "Status Code", PropertyKind::Number, false)
                    .with_default(json!(200)),
            ],
            execute_input_schema: None,
        },
    ]
}
