//! JSON and XML beautify/minify.
//!
//! JSON goes through a real parse so invalid documents are rejected with the
//! parser's position. XML is handled lexically: it is re-indented or
//! compacted but never validated.

use std::sync::OnceLock;
use std::time::Instant;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntaxKind, TransformError};
use crate::output::TransformResult;

const INDENT: &str = "  ";

fn re_tag_gap() -> &'static Regex {
    static TAG_GAP: OnceLock<Regex> = OnceLock::new();
    TAG_GAP.get_or_init(|| Regex::new(r">\s*<").expect("tag gap regex"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Xml,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatAction {
    #[default]
    Beautify,
    Minify,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub format: DataFormat,
    #[serde(default)]
    pub action: FormatAction,
}

/// Formats the request and reports the elapsed time as its status.
///
/// Empty input is not an error: it produces empty output and no status.
pub fn apply(request: &FormatRequest) -> Result<TransformResult> {
    if request.text.is_empty() {
        return Ok(TransformResult::text(""));
    }

    let start = Instant::now();
    let output = format(&request.text, request.format, request.action)?;
    let elapsed = start.elapsed().as_millis();

    Ok(TransformResult::text(output).with_status(format!("Formatted in {elapsed}ms")))
}

pub fn format(text: &str, format: DataFormat, action: FormatAction) -> Result<String> {
    match (format, action) {
        (DataFormat::Json, FormatAction::Beautify) => json_beautify(text),
        (DataFormat::Json, FormatAction::Minify) => json_minify(text),
        (DataFormat::Xml, FormatAction::Beautify) => Ok(xml_beautify(text)),
        (DataFormat::Xml, FormatAction::Minify) => Ok(xml_minify(text)),
    }
}

pub fn json_beautify(text: &str) -> Result<String> {
    let value = parse_json(text)?;
    serde_json::to_string_pretty(&value).map_err(|e| json_error(&e))
}

pub fn json_minify(text: &str) -> Result<String> {
    let value = parse_json(text)?;
    serde_json::to_string(&value).map_err(|e| json_error(&e))
}

fn parse_json(text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).map_err(|e| json_error(&e))
}

fn json_error(e: &serde_json::Error) -> TransformError {
    TransformError::syntax(SyntaxKind::Json, e.to_string())
}

/// Removes whitespace between adjacent tags and trims the ends.
pub fn xml_minify(text: &str) -> String {
    re_tag_gap().replace_all(text, "><").trim().to_string()
}

/// Re-indents markup with two spaces per nesting level.
///
/// Elements whose only child is text stay on one line
/// (`<name>Ada</name>`); everything else gets a line per node.
pub fn xml_beautify(text: &str) -> String {
    let tokens = tokenize(text);
    let mut lines = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            XmlToken::Open { raw, name } => {
                if let Some((content, consumed)) = collapsible(&tokens[i + 1..], name) {
                    lines.push(format!("{}{raw}{content}</{name}>", INDENT.repeat(depth)));
                    i += consumed + 1;
                    continue;
                }
                lines.push(format!("{}{raw}", INDENT.repeat(depth)));
                depth += 1;
            }
            XmlToken::Close { raw } => {
                depth = depth.saturating_sub(1);
                lines.push(format!("{}{raw}", INDENT.repeat(depth)));
            }
            XmlToken::Leaf { raw } => lines.push(format!("{}{raw}", INDENT.repeat(depth))),
            XmlToken::Text(text) => lines.push(format!("{}{text}", INDENT.repeat(depth))),
        }
        i += 1;
    }

    lines.join("\n")
}

/// Returns the inline content and number of tokens used when `rest` starts
/// with an optional text node followed by the closing tag for `name`.
fn collapsible<'a>(rest: &'a [XmlToken], name: &str) -> Option<(&'a str, usize)> {
    match rest {
        [XmlToken::Close { raw }, ..] if closes(raw, name) => Some(("", 1)),
        [XmlToken::Text(text), XmlToken::Close { raw }, ..] if closes(raw, name) => {
            Some((text.as_str(), 2))
        }
        _ => None,
    }
}

fn closes(close_tag: &str, name: &str) -> bool {
    tag_name(close_tag.trim_start_matches("</")) == name
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlToken {
    Open { raw: String, name: String },
    Close { raw: String },
    /// Self-closing tags, comments, CDATA, declarations and processing
    /// instructions: printed verbatim on their own line.
    Leaf { raw: String },
    Text(String),
}

fn tokenize(text: &str) -> Vec<XmlToken> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let Some(end) = markup_end(rest) else {
                // Unterminated markup is kept as text up to the next `<`.
                let next = rest[1..].find('<').map_or(rest.len(), |pos| pos + 1);
                push_text(&mut tokens, &rest[..next]);
                rest = &rest[next..];
                continue;
            };
            let raw = &rest[..end];
            tokens.push(classify(raw));
            rest = &rest[end..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            push_text(&mut tokens, &rest[..end]);
            rest = &rest[end..];
        }
    }

    tokens
}

fn push_text(tokens: &mut Vec<XmlToken>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        tokens.push(XmlToken::Text(trimmed.to_string()));
    }
}

/// Byte offset just past the markup construct starting at `rest[0] == '<'`.
fn markup_end(rest: &str) -> Option<usize> {
    for (open, close) in [("<!--", "-->"), ("<![CDATA[", "]]>"), ("<?", "?>")] {
        if rest.starts_with(open) {
            return rest[open.len()..]
                .find(close)
                .map(|pos| open.len() + pos + close.len());
        }
    }

    let mut quote: Option<char> = None;
    for (pos, c) in rest.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(pos + 1),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

fn classify(raw: &str) -> XmlToken {
    if raw.starts_with("</") {
        XmlToken::Close {
            raw: raw.to_string(),
        }
    } else if raw.starts_with("<!") || raw.starts_with("<?") || raw.ends_with("/>") {
        XmlToken::Leaf {
            raw: raw.to_string(),
        }
    } else {
        XmlToken::Open {
            raw: raw.to_string(),
            name: tag_name(&raw[1..]).to_string(),
        }
    }
}

fn tag_name(after_bracket: &str) -> &str {
    let end = after_bracket
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(after_bracket.len());
    &after_bracket[..end]
}
