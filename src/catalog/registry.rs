/// Swap-on-refresh node catalog using ArcSwap
///
/// Provides lock-free, atomic replacement of the node-type snapshot.
/// Readers always see either the old or the fully-loaded new catalog,
/// never a half-populated one. A failed refresh leaves the previous
/// snapshot intact and surfaces an error to the caller.

use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};

use crate::catalog::seed::builtin_node_types;
use crate::catalog::types::{CategoryDescriptor, NodeCategory, NodeTypeDefinition};
use crate::error::FlowdeckError;

/// Source of catalog content for refresh operations
///
/// Implementations load the full node type set; partial updates are not
/// supported by design.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<NodeTypeDefinition>, FlowdeckError>;
}

/// Catalog source backed by the builtin seed definitions
pub struct SeedCatalogSource;

#[async_trait]
impl CatalogSource for SeedCatalogSource {
    async fn load(&self) -> Result<Vec<NodeTypeDefinition>, FlowdeckError> {
        Ok(builtin_node_types())
    }
}

/// One immutable, fully-loaded catalog generation
#[derive(Debug)]
struct CatalogSnapshot {
    /// Monotonically increasing snapshot version
    version: u64,
    /// Definitions in source order (palette order)
    types: Vec<NodeTypeDefinition>,
    /// Index by type id for validation-time lookups
    by_id: HashMap<String, usize>,
}

impl CatalogSnapshot {
    fn build(version: u64, types: Vec<NodeTypeDefinition>) -> Self {
        let by_id = types
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id.clone(), i))
            .collect();
        Self {
            version,
            types,
            by_id,
        }
    }
}

/// Versioned, replace-only node catalog
///
/// Injected into consumers rather than accessed as ambient global state.
/// Lookups of absent type ids report a distinct unknown-type condition
/// instead of treating the node as configuration-free.
pub struct NodeCatalog {
    snapshot: ArcSwap<CatalogSnapshot>,
    source: Box<dyn CatalogSource>,
}

impl NodeCatalog {
    /// Create a catalog seeded with the builtin definitions
    pub fn with_builtin() -> Self {
        Self {
            snapshot: ArcSwap::new(Arc::new(CatalogSnapshot::build(1, builtin_node_types()))),
            source: Box::new(SeedCatalogSource),
        }
    }

    /// Create a catalog over a custom source, loading the initial snapshot
    pub async fn from_source(source: Box<dyn CatalogSource>) -> Result<Self, FlowdeckError> {
        let types = source.load().await?;
        Ok(Self {
            snapshot: ArcSwap::new(Arc::new(CatalogSnapshot::build(1, types))),
            source,
        })
    }

    /// Current snapshot version
    pub fn version(&self) -> u64 {
        self.snapshot.load().version
    }

    /// Ordered node type definitions
    pub fn types(&self) -> Vec<NodeTypeDefinition> {
        self.snapshot.load().types.clone()
    }

    /// Ordered category descriptors with per-category counts
    pub fn categories(&self) -> Vec<CategoryDescriptor> {
        let snapshot = self.snapshot.load();
        let mut order: Vec<NodeCategory> = Vec::new();
        let mut counts: HashMap<NodeCategory, usize> = HashMap::new();

        for def in &snapshot.types {
            if !counts.contains_key(&def.category) {
                order.push(def.category);
            }
            *counts.entry(def.category).or_insert(0) += 1;
        }

        order
            .into_iter()
            .map(|id| CategoryDescriptor {
                id,
                label: match id {
                    NodeCategory::Trigger => "Triggers".to_string(),
                    NodeCategory::Action => "Actions".to_string(),
                    NodeCategory::Ai => "AI".to_string(),
                    NodeCategory::Logic => "Logic".to_string(),
                },
                count: counts[&id],
            })
            .collect()
    }

    /// Look up a node type definition by id
    ///
    /// An absent id is an UnknownNodeType error, never a silent skip.
    pub fn lookup(&self, type_id: &str) -> Result<NodeTypeDefinition, FlowdeckError> {
        let snapshot = self.snapshot.load();
        snapshot
            .by_id
            .get(type_id)
            .map(|&i| snapshot.types[i].clone())
            .ok_or_else(|| FlowdeckError::UnknownNodeType {
                type_id: type_id.to_string(),
            })
    }

    /// Refresh the catalog from its source
    ///
    /// All-or-nothing: on success the whole snapshot is swapped atomically
    /// and the version bumps; on failure the previous catalog stays in
    /// place and a CatalogUnavailable error is returned for user
    /// notification.
    pub async fn refresh(&self) -> Result<u64, FlowdeckError> {
        let types = self
            .source
            .load()
            .await
            .map_err(|e| FlowdeckError::CatalogUnavailable(e.to_string()))?;

        let next_version = self.snapshot.load().version + 1;
        self.snapshot
            .store(Arc::new(CatalogSnapshot::build(next_version, types)));

        tracing::info!(
            "Refreshed node catalog to version {} ({} types)",
            next_version,
            self.snapshot.load().types.len()
        );

        Ok(next_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn load(&self) -> Result<Vec<NodeTypeDefinition>, FlowdeckError> {
            Err(FlowdeckError::CatalogUnavailable("upstream 503".to_string()))
        }
    }

    #[tokio::test]
    async fn lookup_known_and_unknown_types() {
        let catalog = NodeCatalog::with_builtin();
        let webhook = catalog.lookup("webhook").unwrap();
        assert_eq!(webhook.category, NodeCategory::Trigger);
        assert!(webhook.is_trigger());

        let err = catalog.lookup("nope").unwrap_err();
        assert!(matches!(err, FlowdeckError::UnknownNodeType { .. }));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let catalog = NodeCatalog {
            snapshot: ArcSwap::new(Arc::new(CatalogSnapshot::build(1, builtin_node_types()))),
            source: Box::new(FailingSource),
        };
        let before = catalog.version();
        let types_before = catalog.types().len();

        let err = catalog.refresh().await.unwrap_err();
        assert!(matches!(err, FlowdeckError::CatalogUnavailable(_)));
        assert_eq!(catalog.version(), before);
        assert_eq!(catalog.types().len(), types_before);
    }

    #[tokio::test]
    async fn refresh_bumps_version() {
        let catalog = NodeCatalog::with_builtin();
        assert_eq!(catalog.version(), 1);
        catalog.refresh().await.unwrap();
        assert_eq!(catalog.version(), 2);
    }

    #[test]
    fn categories_preserve_palette_order() {
        let catalog = NodeCatalog::with_builtin();
        let cats = catalog.categories();
        assert_eq!(cats[0].id, NodeCategory::Trigger);
        assert_eq!(cats[0].count, 3);
        assert!(cats.iter().any(|c| c.id == NodeCategory::Ai && c.count == 2));
    }
}
