/// Expose the tools to MCP clients
#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serve newline-delimited JSON-RPC on stdin/stdout
    Stdio,

    /// Serve JSON-RPC over HTTP with an SSE event stream
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    #[arg(short, long, env = "SILLYTEXT_MCP_PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(long, env = "SILLYTEXT_MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,
}
