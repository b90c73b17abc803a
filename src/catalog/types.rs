/// Node type definition model
///
/// Catalog entries describing what kinds of nodes a flow may contain: their
/// grouping category, presentation metadata, and the property schemas used
/// for configuration editing and run submission. Definitions are immutable
/// once loaded into a catalog snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Grouping key for node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Entry points that start a flow (webhook, schedule, manual)
    Trigger,
    /// Processing steps (API calls, transformations, posting)
    Action,
    /// AI-backed steps (chat, image generation)
    Ai,
    /// Flow control and response shaping
    Logic,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Trigger => "trigger",
            NodeCategory::Action => "action",
            NodeCategory::Ai => "ai",
            NodeCategory::Logic => "logic",
        }
    }
}

/// Value kind of a configuration property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Select,
    /// Single uploaded file; the stored value is the upload URL string
    File,
    /// Multiple uploaded files; stored as an array of URL strings
    Files,
    /// Free-form key/value object
    Json,
}

/// One property descriptor in a node type's configuration schema
///
/// Ordered sequences of these make up `config_schema` and the optional
/// `execute_input_schema` override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Stable property key used in node config maps
    pub name: String,
    /// Human-readable label, reported in validation messages
    pub label: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
    /// Default value applied when a node is added from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed choices for select properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// MIME accept pattern for file properties (e.g., "image/*")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

impl PropertyDescriptor {
    /// Shorthand constructor for the builtin seed definitions
    pub fn new(name: &str, label: &str, kind: PropertyKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
            default: None,
            options: None,
            accept: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_accept(mut self, accept: &str) -> Self {
        self.accept = Some(accept.to_string());
        self
    }
}

/// A catalog entry describing one node type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDefinition {
    /// Stable string key referenced by FlowNode.type_id (e.g., "webhook")
    pub id: String,
    pub category: NodeCategory,
    pub label: String,
    /// Presentation color (hex), not semantically relevant to execution
    pub color: String,
    #[serde(default)]
    pub description: String,
    /// Ordered property descriptors for configuration editing
    pub config_schema: Vec<PropertyDescriptor>,
    /// Optional override schema used at run-submission time.
    /// Falls back to `config_schema` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_input_schema: Option<Vec<PropertyDescriptor>>,
}

impl NodeTypeDefinition {
    /// Whether nodes of this type start a flow
    pub fn is_trigger(&self) -> bool {
        self.category == NodeCategory::Trigger
    }

    /// Schema to validate against when preparing a run submission.
    /// Uses the execution-input override when one is declared.
    pub fn execution_schema(&self) -> &[PropertyDescriptor] {
        self.execute_input_schema
            .as_deref()
            .unwrap_or(&self.config_schema)
    }
}

/// Category descriptor for palette grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDescriptor {
    pub id: NodeCategory,
    pub label: String,
    /// Number of node types currently in this category
    pub count: usize,
}
