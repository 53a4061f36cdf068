//! Stdio transport setup.
//!
//! Wires [`EmbedServer`] to stdin/stdout for direct invocation by MCP
//! clients. Logs go to stderr so they never interleave with protocol frames.

use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handler::EmbedServer;
use crate::{AppError, Result};

/// Serve `server` over stdio until the client disconnects or the
/// cancellation token fires.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the transport fails to initialize or the
/// service terminates abnormally.
pub async fn serve_stdio(server: EmbedServer, ct: CancellationToken) -> Result<()> {
    let transport = stdio();

    info!(
        prompts = server.prompt_count(),
        resources = server.resource_count(),
        "starting stdio MCP transport"
    );
    let service = server
        .serve_with_ct(transport, ct)
        .await
        .map_err(|err| AppError::Mcp(format!("stdio transport failed: {err}")))?;

    service
        .waiting()
        .await
        .map_err(|err| AppError::Mcp(format!("stdio service error: {err}")))?;

    info!("stdio MCP transport shut down");
    Ok(())
}
