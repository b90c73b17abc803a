/// SQLite persistence layer for flow storage
///
/// Handles flow CRUD in SQLite via sqlx. Flow definitions are stored as a
/// JSON column for flexibility, with indexed metadata fields (name, status)
/// for filtered listing.

use sqlx::{sqlite::SqlitePool, Row};

use crate::error::FlowdeckError;
use crate::flow::types::{Flow, FlowStatus};

/// Listing filters and pagination
#[derive(Debug, Clone, Default)]
pub struct FlowListQuery {
    pub status: Option<FlowStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Basic flow metadata for listing operations
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetadata {
    pub id: String,
    pub name: String,
    pub status: FlowStatus,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// SQLite-based flow storage manager
#[derive(Debug, Clone)]
pub struct FlowStorage {
    pool: SqlitePool,
}

impl FlowStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the flow storage schema
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<(), FlowdeckError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS flows (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                version INTEGER NOT NULL DEFAULT 1,
                definition JSON NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_flows_status
            ON flows(status)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a new flow or update an existing one
    ///
    /// UPSERT keeps create and update atomic; updated_at refreshes
    /// automatically.
    pub async fn save_flow(&self, flow: &Flow) -> Result<(), FlowdeckError> {
        let definition_json = serde_json::to_string(flow)?;
        let status_json = status_str(flow.status);

        sqlx::query(
            r#"
            INSERT INTO flows (id, name, status, version, definition, updated_at)
            VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                status = excluded.status,
                version = excluded.version,
                definition = excluded.definition,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&flow.id)
        .bind(&flow.name)
        .bind(status_json)
        .bind(flow.version as i64)
        .bind(&definition_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieve a flow by ID
    pub async fn get_flow(&self, id: &str) -> Result<Option<Flow>, FlowdeckError> {
        let row = sqlx::query("SELECT definition FROM flows WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let definition_json: String = row.get("definition");
                let flow: Flow = serde_json::from_str(&definition_json)?;
                Ok(Some(flow))
            }
            None => Ok(None),
        }
    }

    /// List flows with optional status filter and pagination,
    /// most recently updated first
    pub async fn list_flows(
        &self,
        query: FlowListQuery,
    ) -> Result<Vec<FlowMetadata>, FlowdeckError> {
        let limit = query.limit.unwrap_or(50);
        let offset = query.offset.unwrap_or(0);

        let rows = match query.status {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT id, name, status, version, created_at, updated_at
                    FROM flows WHERE status = ?
                    ORDER BY updated_at DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(status_str(status))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, status, version, created_at, updated_at
                    FROM flows
                    ORDER BY updated_at DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut flows = Vec::new();
        for row in rows {
            let status: String = row.get("status");
            flows.push(FlowMetadata {
                id: row.get("id"),
                name: row.get("name"),
                status: parse_status(&status),
                version: row.get("version"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok(flows)
    }

    /// Duplicate a flow under a fresh id, reset to draft
    pub async fn duplicate_flow(&self, id: &str) -> Result<Flow, FlowdeckError> {
        let source = self
            .get_flow(id)
            .await?
            .ok_or_else(|| FlowdeckError::FlowNotFound(id.to_string()))?;

        let mut copy = source.clone();
        copy.id = format!("flow-{}", uuid::Uuid::new_v4().simple());
        copy.name = format!("{} (copy)", source.name);
        copy.status = FlowStatus::Draft;
        copy.version = 1;

        self.save_flow(&copy).await?;
        tracing::info!("Duplicated flow {} as {}", id, copy.id);
        Ok(copy)
    }

    /// Mark a flow as archived
    pub async fn archive_flow(&self, id: &str) -> Result<Flow, FlowdeckError> {
        let mut flow = self
            .get_flow(id)
            .await?
            .ok_or_else(|| FlowdeckError::FlowNotFound(id.to_string()))?;

        flow.status = FlowStatus::Archived;
        self.save_flow(&flow).await?;
        Ok(flow)
    }

    /// Delete a flow by ID; returns whether a row was removed
    pub async fn delete_flow(&self, id: &str) -> Result<bool, FlowdeckError> {
        let result = sqlx::query("DELETE FROM flows WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn status_str(status: FlowStatus) -> &'static str {
    match status {
        FlowStatus::Draft => "draft",
        FlowStatus::Published => "published",
        FlowStatus::Archived => "archived",
    }
}

fn parse_status(raw: &str) -> FlowStatus {
    match raw {
        "published" => FlowStatus::Published,
        "archived" => FlowStatus::Archived,
        _ => FlowStatus::Draft,
    }
}
