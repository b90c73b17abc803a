/// Flowdeck: workflow execution subsystem for node-based automations
///
/// Main entry point for the Flowdeck server. Initializes configuration and
/// starts the HTTP server with catalog, flow, and execution endpoints.

use flowdeck::{config::Config, server::start_server};

/// Application entry point
///
/// Starts the server with default configuration. The server provides:
/// - Node catalog API at /api/node-types/*
/// - Flow management API at /api/flows/*
/// - Execution tracking at /api/executions/*
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to localhost:3006 and a SQLite database)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
