use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::output::TransformResult;

fn re_space_run() -> &'static Regex {
    static SPACE_RUN: OnceLock<Regex> = OnceLock::new();
    SPACE_RUN.get_or_init(|| Regex::new(r" +").expect("space regex"))
}

fn re_line_break() -> &'static Regex {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("line break regex"))
}

pub const DEFAULT_TAB_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitespaceOp {
    TrimLines,
    RemoveExtraSpaces,
    RemoveAllWhitespace,
    RemoveAllLineBreaks,
    TabsToSpaces,
    SpacesToTabs,
    NormalizeNewlinesLf,
    NormalizeNewlinesCrlf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhitespaceRequest {
    #[serde(default)]
    pub text: String,
    pub operation: WhitespaceOp,
    /// Raw user input for the tab width; see [`parse_tab_width`].
    #[serde(default, deserialize_with = "lenient_width")]
    pub tab_width: Option<String>,
}

pub fn apply(request: &WhitespaceRequest) -> TransformResult {
    let width = parse_tab_width(request.tab_width.as_deref().unwrap_or_default());
    let output = transform(&request.text, request.operation, width);
    let status = removal_status(&request.text, &output);
    TransformResult::text(output).with_status(status)
}

pub fn transform(text: &str, op: WhitespaceOp, tab_width: usize) -> String {
    match op {
        WhitespaceOp::TrimLines => trim_lines(text),
        WhitespaceOp::RemoveExtraSpaces => remove_extra_spaces(text),
        WhitespaceOp::RemoveAllWhitespace => remove_all_whitespace(text),
        WhitespaceOp::RemoveAllLineBreaks => remove_all_line_breaks(text),
        WhitespaceOp::TabsToSpaces => tabs_to_spaces(text, tab_width),
        WhitespaceOp::SpacesToTabs => spaces_to_tabs(text, tab_width),
        WhitespaceOp::NormalizeNewlinesLf => normalize_newlines_lf(text),
        WhitespaceOp::NormalizeNewlinesCrlf => normalize_newlines_crlf(text),
    }
}

pub fn trim_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Collapses runs of the space character. Tabs are left alone.
pub fn remove_extra_spaces(text: &str) -> String {
    re_space_run().replace_all(text, " ").into_owned()
}

pub fn remove_all_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn remove_all_line_breaks(text: &str) -> String {
    re_line_break().replace_all(text, " ").into_owned()
}

pub fn tabs_to_spaces(text: &str, width: usize) -> String {
    text.replace('\t', &" ".repeat(width.max(1)))
}

pub fn spaces_to_tabs(text: &str, width: usize) -> String {
    text.replace(&" ".repeat(width.max(1)), "\t")
}

pub fn normalize_newlines_lf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn normalize_newlines_crlf(text: &str) -> String {
    normalize_newlines_lf(text).replace('\n', "\r\n")
}

/// Reads a tab width the way a number field is usually read: optional
/// leading whitespace and sign, then the leading digits. Anything that does
/// not produce a positive number falls back to [`DEFAULT_TAB_WIDTH`].
pub fn parse_tab_width(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();

    match digits.parse::<usize>() {
        Ok(width) if width > 0 && !negative => width,
        _ => DEFAULT_TAB_WIDTH,
    }
}

/// Describes how many characters an operation removed.
///
/// Operations that grow the text report "No changes made." as well: only a
/// net decrease is reported.
pub fn removal_status(before: &str, after: &str) -> String {
    let before_len = before.encode_utf16().count();
    let after_len = after.encode_utf16().count();

    if after_len < before_len {
        format!("{} character(s) removed.", before_len - after_len)
    } else {
        "No changes made.".to_string()
    }
}

fn lenient_width<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "  Some example text \n\n with   extra spaces and\t tabs.  \n\n";

    #[test]
    fn test_trim_lines_preserves_line_count() {
        let out = trim_lines(SAMPLE);
        assert_eq!(out, "Some example text\n\nwith   extra spaces and\t tabs.\n\n");
        assert_eq!(out.split('\n').count(), SAMPLE.split('\n').count());
    }

    #[test]
    fn test_remove_extra_spaces_ignores_tabs() {
        assert_eq!(remove_extra_spaces("a   b\t\tc  d"), "a b\t\tc d");
    }

    #[test]
    fn test_remove_all_whitespace() {
        assert_eq!(remove_all_whitespace(" a\tb\r\nc "), "abc");
    }

    #[test]
    fn test_remove_all_line_breaks() {
        assert_eq!(remove_all_line_breaks("a\r\nb\nc\rd"), "a b c d");
    }

    #[test]
    fn test_tab_conversions() {
        assert_eq!(tabs_to_spaces("\ta\t", 4), "    a    ");
        assert_eq!(spaces_to_tabs("     x", 2), "\t\t x");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines_lf("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_newlines_crlf("a\r\nb\rc\n"), "a\r\nb\r\nc\r\n");
    }

    #[test]
    fn test_parse_tab_width() {
        assert_eq!(parse_tab_width("4"), 4);
        assert_eq!(parse_tab_width(" 3abc"), 3);
        assert_eq!(parse_tab_width("0"), DEFAULT_TAB_WIDTH);
        assert_eq!(parse_tab_width("-5"), DEFAULT_TAB_WIDTH);
        assert_eq!(parse_tab_width("abc"), DEFAULT_TAB_WIDTH);
        assert_eq!(parse_tab_width(""), DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn test_removal_status() {
        assert_eq!(removal_status("a  b", "a b"), "1 character(s) removed.");
        assert_eq!(removal_status("a\tb", "a  b"), "No changes made.");
        assert_eq!(removal_status("ab", "ab"), "No changes made.");
    }

    #[test]
    fn test_apply_accepts_numeric_tab_width() {
        let request: WhitespaceRequest = serde_json::from_value(serde_json::json!({
            "text": "\tx",
            "operation": "tabs-to-spaces",
            "tab_width": 4
        }))
        .unwrap();
        let result = apply(&request);
        assert_eq!(result.to_plain_text(), "    x");
        assert_eq!(result.status.as_deref(), Some("No changes made."));
    }
}
