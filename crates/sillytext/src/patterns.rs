use sillytext_core::patterns::PatternBook;

use crate::prelude::{println, *};
use crate::storage::FileStore;

#[derive(Debug, clap::Parser)]
#[command(name = "patterns")]
#[command(about = "Saved find-and-replace patterns")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List saved patterns
    #[clap(name = "list")]
    List(ListOptions),

    /// Save a regular expression under a name
    #[clap(name = "add")]
    Add(AddOptions),

    /// Delete every pattern saved under a name
    #[clap(name = "delete")]
    Delete(NameOptions),

    /// Print the pattern saved under a name
    #[clap(name = "show")]
    Show(NameOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct AddOptions {
    /// Name to save the pattern under
    pub name: String,

    /// Regular expression
    pub pattern: String,

    /// Treat the pattern as literal text (rejected: only regular expressions can be saved)
    #[arg(long)]
    pub literal: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct NameOptions {
    /// Pattern name
    pub name: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let store = FileStore::open(global.data_dir.as_deref())?;
    if global.verbose {
        println!("Pattern store: {}", store.dir().display());
        println!();
    }

    let mut book = PatternBook::load(store);

    match app.command {
        Commands::List(options) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(book.patterns())?);
            } else if book.patterns().is_empty() {
                println!("No saved patterns found.");
            } else {
                let mut table = new_table();
                table.set_titles(prettytable::row!["Name".bold().cyan(), "Pattern".bold().cyan()]);
                for saved in book.patterns() {
                    table.add_row(prettytable::row![saved.name, saved.pattern]);
                }
                table.printstd();
            }
        }
        Commands::Add(options) => {
            book.add(&options.name, &options.pattern, !options.literal)
                .map_err(Error::from)?;
            println!("{}", format!("Pattern saved: {}", options.name).green());
        }
        Commands::Delete(options) => {
            let removed = book.remove(&options.name).map_err(Error::from)?;
            if removed == 0 {
                println!("No saved pattern named {}", options.name);
            } else {
                println!("Pattern deleted: {}", options.name);
            }
        }
        Commands::Show(options) => {
            let saved = book
                .find(&options.name)
                .ok_or_else(|| eyre!("No saved pattern named `{}`", options.name))?;
            println!("{}", saved.pattern);
        }
    }

    Ok(())
}
