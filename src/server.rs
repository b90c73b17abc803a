/// Server setup and initialization
///
/// Wires together all components: flow storage, node catalog, execution
/// backend client, run coordinator, and HTTP routes. Provides the main
/// application factory function for creating the Axum app.

use crate::{
    api::{
        executions::create_execution_routes, flows::create_flow_routes,
        node_types::create_node_type_routes, AppState,
    },
    catalog::NodeCatalog,
    config::Config,
    execution::{ExecutionCoordinator, HttpExecutionBackend},
    flow::FlowStorage,
};
use anyhow::Result;
use axum::{routing::get, Router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes and state
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("Connecting flow database: {}", config.database.url);
    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    let storage = FlowStorage::new(pool);
    storage
        .init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize flow schema: {}", e))?;

    tracing::info!("Loading node catalog (builtin seed)");
    let catalog = Arc::new(NodeCatalog::with_builtin());

    tracing::info!("Execution backend: {}", config.engine.base_url);
    let backend = Arc::new(HttpExecutionBackend::new(config.engine.base_url.clone()));

    let coordinator = Arc::new(ExecutionCoordinator::from_config(
        backend.clone(),
        &config.engine,
    ));

    let app_state = AppState {
        storage,
        catalog,
        backend,
        coordinator,
    };

    let app = Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Node catalog endpoints
        .merge(create_node_type_routes())
        // Flow management endpoints
        .merge(create_flow_routes())
        // Execution endpoints
        .merge(create_execution_routes())
        .with_state(app_state);

    tracing::info!("Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Flowdeck server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
