use anyhow::Context;
use rmcp::{ServiceExt, transport::stdio};
use robeson_directory::{Config, DirectoryServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr only: stdout carries the MCP protocol
    robeson_directory::tracing::init();

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        "Starting robeson-directory MCP server (feed: {})",
        config.data.path.display()
    );

    let server = DirectoryServer::from_config(&config).await;
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
