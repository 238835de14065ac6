use std::path::PathBuf;

use crate::prelude::*;
use clap::Parser;

mod analytics;
mod clipboard;
mod dispatch;
mod error;
mod list;
mod mcp;
mod patterns;
mod prelude;
mod run;
mod storage;
mod web;
mod widgets;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Small text utilities: case conversion, counting, cleanup, diffs, encoders, formatters, CSV reshaping, typography and generators"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "SILLYTEXT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Directory for saved patterns (default: <data dir>/sillytext)
    #[clap(long, env = "SILLYTEXT_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List the available tools
    List(crate::list::ListOptions),

    /// Run one tool
    Run(crate::run::RunOptions),

    /// Manage saved find-and-replace patterns
    Patterns(crate::patterns::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),

    /// Serve the tool directory over HTTP
    Serve(crate::web::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Run(options) => crate::run::run(options, app.global).await,
        SubCommands::Patterns(sub_app) => crate::patterns::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
        SubCommands::Serve(options) => crate::web::run(options, app.global).await,
    }
}
