//! Delimited-text reshaping.
//!
//! Parsing is a plain lexical split: rows on `\n`, cells on the delimiter.
//! Quoted cells are not special, a delimiter inside quotes still splits.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TransformError};
use crate::output::TransformResult;

pub type Grid = Vec<Vec<String>>;

pub const DEFAULT_FROM_DELIMITER: char = ',';
pub const DEFAULT_TO_DELIMITER: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvOp {
    ChangeDelimiter,
    Transpose,
    QuoteAll,
    UnquoteAll,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvRequest {
    #[serde(default)]
    pub text: String,
    pub operation: CsvOp,
    #[serde(default = "default_from", deserialize_with = "single_char")]
    pub from_delimiter: char,
    #[serde(default = "default_to", deserialize_with = "single_char")]
    pub to_delimiter: char,
}

fn default_from() -> char {
    DEFAULT_FROM_DELIMITER
}

fn default_to() -> char {
    DEFAULT_TO_DELIMITER
}

fn single_char<'de, D>(deserializer: D) -> std::result::Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_delimiter(&raw).map_err(serde::de::Error::custom)
}

/// A delimiter is exactly one character.
pub fn parse_delimiter(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TransformError::configuration(format!(
            "delimiter must be a single character, got {raw:?}"
        ))),
    }
}

pub fn apply(request: &CsvRequest) -> Result<TransformResult> {
    let grid = parse(&request.text, request.from_delimiter);
    let from = request.from_delimiter;
    let to = request.to_delimiter;

    let output = match request.operation {
        CsvOp::ChangeDelimiter => stringify(&grid, to),
        CsvOp::Transpose => stringify(&transpose(&grid)?, to),
        CsvOp::QuoteAll => stringify(&quote_all(&grid), from),
        CsvOp::UnquoteAll => stringify(&unquote_all(&grid), from),
    };

    Ok(TransformResult::text(output))
}

pub fn parse(text: &str, delimiter: char) -> Grid {
    text.split('\n')
        .map(|row| row.split(delimiter).map(str::to_string).collect())
        .collect()
}

pub fn stringify(grid: &Grid, delimiter: char) -> String {
    let separator = delimiter.to_string();
    grid.iter()
        .map(|row| row.join(&separator))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Swaps rows and columns.
///
/// The first row decides how many columns there are; cells missing from
/// shorter rows become empty strings.
pub fn transpose(grid: &Grid) -> Result<Grid> {
    let first = grid
        .first()
        .ok_or_else(|| TransformError::configuration("cannot transpose an empty table"))?;

    Ok((0..first.len())
        .map(|col| {
            grid.iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect())
}

pub fn quote_all(grid: &Grid) -> Grid {
    map_cells(grid, |cell| format!("\"{}\"", cell.replace('"', "\"\"")))
}

pub fn unquote_all(grid: &Grid) -> Grid {
    map_cells(grid, |cell| {
        let inner = if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
            &cell[1..cell.len() - 1]
        } else {
            cell
        };
        inner.replace("\"\"", "\"")
    })
}

fn map_cells(grid: &Grid, f: impl Fn(&str) -> String) -> Grid {
    grid.iter()
        .map(|row| row.iter().map(|cell| f(cell)).collect())
        .collect()
}
