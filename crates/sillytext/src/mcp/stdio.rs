use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::Server;

/// Serves newline-delimited JSON-RPC on stdin/stdout until stdin closes.
pub async fn run_stdio(server: Server) -> Result<()> {
    let verbose = server.global.verbose;
    if verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        if verbose {
            eprintln!("Received: {request}");
        }

        let Some(response) = super::handle_request(request, &server).await else {
            continue;
        };
        let mut encoded = serde_json::to_string(&response)?;

        if verbose {
            eprintln!("Sending: {encoded}");
        }

        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    log::debug!("stdin closed, stopping MCP server");
    Ok(())
}
