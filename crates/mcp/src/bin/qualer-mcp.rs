// Standalone MCP server binary

use anyhow::Result;
use qualer_mcp::server::McpServer;
use qualer_mcp::tools::*;
use qualer_mcp::ResourceCatalog;
use qualer_sdk::SharedClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries protocol frames; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Qualer MCP server starting");

    // Credentials are read lazily: a missing QUALER_TOKEN surfaces as a
    // structured error on the first tool call, not as a startup crash.
    let client = Arc::new(SharedClient::new());

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetServiceOrderTool::new(Arc::clone(&client))));
    registry.register(Arc::new(SearchServiceOrdersTool::new(Arc::clone(&client))));
    registry.register(Arc::new(GetAssetTool::new(Arc::clone(&client))));
    registry.register(Arc::new(SearchAssetsTool::new(Arc::clone(&client))));
    registry.register(Arc::new(ListServiceOrderDocumentsTool::new(Arc::clone(
        &client,
    ))));
    registry.register(Arc::new(ListWorkItemDocumentsTool::new(Arc::clone(
        &client,
    ))));

    tracing::info!("Registered {} tools", registry.list_schemas().len());

    let resources = ResourceCatalog::new(client);

    let server = McpServer::new(registry, resources);
    server.run().await?;

    Ok(())
}
