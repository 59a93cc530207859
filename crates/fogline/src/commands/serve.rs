//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use fogline_core::Config;

use crate::server::FoglineServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // stdio is the only transport.
}

/// Run the MCP server until the client disconnects.
///
/// Stdout carries the protocol, so all logging goes to stderr or the log file.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let server = FoglineServer::from_config(config);
    info!(max_input_bytes = ?config.input_limit(), "starting MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
