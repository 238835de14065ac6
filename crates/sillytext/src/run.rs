use std::io::IsTerminal;
use std::path::PathBuf;

use serde_json::{Map, Value};
use sillytext_core::patterns::PatternBook;
use sillytext_core::{Output, Registry, TransformResult};
use tokio::io::AsyncReadExt;

use crate::analytics::{self, EventName};
use crate::clipboard::ClipboardProvider;
use crate::dispatch;
use crate::prelude::{eprintln, println, *};
use crate::storage::FileStore;
use crate::widgets::Widget;

/// Options for running a single tool
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Convert to kebab case:
  sillytext run case-converter --text \"Hello World\" -o style=kebab

  # Pretty-print a JSON file:
  sillytext run json-xml-formatter --file data.json

  # Compare two files:
  sillytext run diff-tool --file old.txt -O right=new.txt

  # Replace with a saved pattern and copy the result:
  sillytext run find-and-replace --file config.js --pattern keys -o replace=NEW_KEY --copy

  # Generate a 32 character password without symbols:
  sillytext run password-generator -o length=32 -o symbols=false

NOTES:
  - Tool ids are listed by `sillytext list`
  - Input is read from stdin when neither --text nor --file is given")]
pub struct RunOptions {
    /// Tool id (e.g. "case-converter")
    pub tool: String,

    /// Text input
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text input from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Tool option as key=value (repeatable)
    #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Tool option whose value is read from a file, as key=path (repeatable)
    #[arg(short = 'O', long = "option-file", value_parser = parse_key_value)]
    pub option_files: Vec<(String, String)>,

    /// Load a saved find-and-replace pattern into `find` (enables regex mode)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy the result to the system clipboard
    #[arg(long)]
    pub copy: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

/// Converts a raw option string to the JSON type the widget schema declares.
pub fn coerce_option(widget: &Widget, key: &str, raw: &str) -> Result<Value> {
    match widget.property_type(key) {
        Some("boolean") => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| eyre!("Option `{key}` expects true or false, got `{raw}`")),
        Some("integer") => raw
            .parse::<u64>()
            .map(Value::from)
            .map_err(|_| eyre!("Option `{key}` expects a non-negative integer, got `{raw}`")),
        Some(_) => Ok(Value::String(raw.to_string())),
        None => Err(eyre!(
            "Unknown option `{key}` for {}",
            widget.tool.as_str()
        )),
    }
}

pub async fn run(options: RunOptions, global: crate::Global) -> Result<()> {
    let registry = Registry::builtin();
    let loader = dispatch::activate(&registry, &options.tool)?;
    let widget = loader.load();

    let mut arguments = Map::new();

    if let Some(name) = &options.pattern {
        let book = PatternBook::load(FileStore::open(global.data_dir.as_deref())?);
        let saved = book
            .find(name)
            .ok_or_else(|| eyre!("No saved pattern named `{name}`"))?;
        arguments.insert("find".to_string(), Value::String(saved.pattern.clone()));
        arguments.insert("regex".to_string(), Value::Bool(true));
    }

    for (key, raw) in &options.options {
        arguments.insert(key.clone(), coerce_option(widget, key, raw)?);
    }

    for (key, path) in &options.option_files {
        let contents = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read {path}"))?;
        arguments.insert(key.clone(), coerce_option(widget, key, &contents)?);
    }

    if let Some(field) = widget.primary_input {
        let input = read_input(&options).await?;
        arguments.insert(field.to_string(), Value::String(input));
    }

    if global.verbose {
        eprintln!("Running {} with {}", loader.tool(), Value::Object(arguments.clone()));
    }

    let result = dispatch::invoke(&loader, Value::Object(arguments))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if options.copy {
        copy_result(&result, loader.tool());
    }

    Ok(())
}

async fn read_input(options: &RunOptions) -> Result<String> {
    if let Some(text) = &options.text {
        return Ok(text.clone());
    }

    if let Some(path) = &options.file {
        return tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read {}", path.display()));
    }

    if std::io::stdin().is_terminal() {
        return Err(eyre!("No input given: use --text, --file or pipe text on stdin"));
    }

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}

fn print_result(result: &TransformResult) {
    match &result.output {
        Output::Text { text } => println!("{text}"),
        Output::List { items } => {
            for item in items {
                println!("{item}");
            }
        }
        Output::Diff { left, right } => {
            for (l, r) in left.iter().zip(right) {
                if l.changed {
                    println!("{} {}", "-".red(), l.text.red());
                    println!("{} {}", "+".green(), r.text.green());
                } else {
                    println!("  {}", l.text);
                }
            }
        }
        Output::Stats(stats) => {
            let mut table = new_table();
            table.add_row(prettytable::row!["Words", stats.words]);
            table.add_row(prettytable::row!["Characters", stats.characters]);
            table.add_row(prettytable::row![
                "Characters (no spaces)",
                stats.characters_without_spaces
            ]);
            table.add_row(prettytable::row!["Lines", stats.lines]);
            table.printstd();
        }
    }

    if let Some(status) = &result.status {
        eprintln!("{}", status.dimmed());
    }
}

fn copy_result(result: &TransformResult, tool: sillytext_core::ToolId) {
    if result.is_empty() {
        return;
    }

    match ClipboardProvider::detect().copy(&result.to_plain_text()) {
        Ok(()) => {
            eprintln!("{}", "Copied to clipboard!".green());
            analytics::track_event(
                EventName::ShareClicked,
                tool,
                serde_json::json!({ "method": "copy_flag" }),
            );
        }
        Err(e) => log::warn!("Could not copy to clipboard: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::build;
    use sillytext_core::ToolId;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("style=kebab").unwrap(),
            ("style".to_string(), "kebab".to_string())
        );
        assert_eq!(
            parse_key_value("replace=a=b").unwrap(),
            ("replace".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_coerce_option_follows_schema() {
        let widget = build(ToolId::PasswordGenerator);
        assert_eq!(coerce_option(&widget, "length", "32").unwrap(), Value::from(32u64));
        assert_eq!(coerce_option(&widget, "symbols", "false").unwrap(), Value::Bool(false));
        assert!(coerce_option(&widget, "length", "many").is_err());
        assert!(coerce_option(&widget, "colour", "red").is_err());
    }

    #[test]
    fn test_coerce_option_keeps_strings_verbatim() {
        let widget = build(ToolId::CsvTool);
        assert_eq!(
            coerce_option(&widget, "to_delimiter", "1").unwrap(),
            Value::String("1".to_string())
        );
    }
}
