use async_trait::async_trait;
use eyre::{Result, eyre};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::net::SocketAddr;
use tracing::info;

use streamwatch_core::config::Settings;
use streamwatch_core::tools::StreamerTools;

use super::Command;
use crate::mcp::StreamerServer;

pub struct ServeCommand {
    pub settings: Settings,
    pub http: Option<SocketAddr>,
}

impl ServeCommand {
    async fn serve_stdio(&self, server: StreamerServer) -> Result<()> {
        info!(registry = %self.settings.registry_path.display(), "serving MCP on stdio");

        let service = server
            .serve(stdio())
            .await
            .map_err(|e| eyre!("Failed to start MCP server: {}", e))?;
        let reason = service.waiting().await?;

        info!(?reason, "MCP session ended");
        Ok(())
    }

    async fn serve_http(&self, server: StreamerServer, addr: SocketAddr) -> Result<()> {
        // Every session gets a clone sharing one registry and credential cache.
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutdown signal received");
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        if self.settings.twitch.client_id.is_none() || self.settings.twitch.client_secret.is_none()
        {
            tracing::warn!("Twitch client credentials are not configured; live status tools will fail");
        }

        let tools = StreamerTools::from_settings(&self.settings)?;
        let server = StreamerServer::new(tools);

        match self.http {
            Some(addr) => self.serve_http(server, addr).await,
            None => self.serve_stdio(server).await,
        }
    }
}
