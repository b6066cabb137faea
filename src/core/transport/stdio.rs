//! STDIO transport: one MCP session over the process's stdin/stdout.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    ///
    /// stdout is reserved for protocol frames; logs go to stderr.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();
        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;
        info!("{} ready on stdin/stdout", name);

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO session ended: {:?}", reason);
        Ok(())
    }
}
