use sillytext_core::Registry;

use crate::prelude::{println, *};

/// Options for listing tools
#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Only show tools whose name or description contains this text
    #[arg(short, long, env = "SILLYTEXT_SEARCH")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, _global: crate::Global) -> Result<()> {
    let registry = Registry::builtin();
    let tools = registry.search(options.search.as_deref().unwrap_or_default());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    if tools.is_empty() {
        println!("No tools found.");
        return Ok(());
    }

    let mut table = new_table();
    table.set_titles(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Description".bold().cyan()
    ]);

    for tool in &tools {
        table.add_row(prettytable::row![
            tool.id.as_str().green(),
            tool.name,
            tool.description
        ]);
    }

    table.printstd();
    Ok(())
}
