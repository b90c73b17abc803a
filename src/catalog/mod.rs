/// Node Catalog
///
/// A versioned registry of node-type definitions. Pure data plus lookup:
/// each definition declares its configuration schema and an optional
/// execution-input schema used at run-submission time. The catalog is
/// replace-only - a refresh swaps the entire snapshot atomically, and a
/// failed refresh leaves the previous catalog intact.

// Node type definition and property descriptor types
pub mod types;

// Builtin node type definitions (triggers, actions, AI nodes)
pub mod seed;

// Swap-on-refresh catalog registry using ArcSwap
pub mod registry;

pub use registry::{CatalogSource, NodeCatalog, SeedCatalogSource};
pub use types::{
    CategoryDescriptor, NodeCategory, NodeTypeDefinition, PropertyDescriptor, PropertyKind,
};
