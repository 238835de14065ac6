//! Result envelope shared by every tool.

use serde::Serialize;

use crate::counter::TextStats;
use crate::diff::DiffLine;

/// The payload a tool produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Text {
        text: String,
    },
    /// Two parallel, equally long line sequences.
    Diff {
        left: Vec<DiffLine>,
        right: Vec<DiffLine>,
    },
    /// Generated values, one per entry (UUIDs, passwords).
    List {
        items: Vec<String>,
    },
    Stats(TextStats),
}

/// Output of one transformation plus an optional human-readable status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub output: Output,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TransformResult {
    pub fn text(text: impl Into<String>) -> Self {
        TransformResult {
            output: Output::Text { text: text.into() },
            status: None,
        }
    }

    pub fn list(items: Vec<String>) -> Self {
        TransformResult {
            output: Output::List { items },
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Flattens the payload into the string a user would copy.
    ///
    /// Lists are joined with newlines, diffs become a side-by-side listing
    /// with `!` marking changed lines.
    pub fn to_plain_text(&self) -> String {
        match &self.output {
            Output::Text { text } => text.clone(),
            Output::List { items } => items.join("\n"),
            Output::Diff { left, right } => left
                .iter()
                .zip(right)
                .map(|(l, r)| {
                    let marker = if l.changed { '!' } else { ' ' };
                    format!("{marker} {} | {}", l.text, r.text)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Output::Stats(stats) => format!(
                "Words: {}\nCharacters: {}\nCharacters (no spaces): {}\nLines: {}",
                stats.words,
                stats.characters,
                stats.characters_without_spaces,
                stats.lines
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.output {
            Output::Text { text } => text.is_empty(),
            Output::List { items } => items.is_empty(),
            Output::Diff { left, .. } => left.is_empty(),
            Output::Stats(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_plain_text_is_newline_joined() {
        let result = TransformResult::list(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.to_plain_text(), "a\nb");
    }

    #[test]
    fn test_diff_plain_text_marks_changed_lines() {
        let result = TransformResult {
            output: Output::Diff {
                left: vec![DiffLine::new("a", false), DiffLine::new("b", true)],
                right: vec![DiffLine::new("a", false), DiffLine::new("x", true)],
            },
            status: None,
        };
        assert_eq!(result.to_plain_text(), "  a | a\n! b | x");
    }

    #[test]
    fn test_serialized_text_output_is_tagged() {
        let result = TransformResult::text("hi").with_status("done");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["output"]["kind"], "text");
        assert_eq!(value["output"]["text"], "hi");
        assert_eq!(value["status"], "done");
    }

    #[test]
    fn test_empty_text_result() {
        assert!(TransformResult::text("").is_empty());
        assert!(!TransformResult::text("x").is_empty());
    }
}
