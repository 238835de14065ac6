use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::output::TransformResult;

fn re_sentence_start() -> &'static Regex {
    static SENTENCE_START: OnceLock<Regex> = OnceLock::new();
    SENTENCE_START.get_or_init(|| Regex::new(r"(^\s*\w|[.!?]\s*\w)").expect("sentence regex"))
}

fn re_case_boundary() -> &'static Regex {
    static CASE_BOUNDARY: OnceLock<Regex> = OnceLock::new();
    CASE_BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary regex"))
}

fn re_whitespace_run() -> &'static Regex {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    #[serde(alias = "upper")]
    Uppercase,
    #[serde(alias = "lower")]
    Lowercase,
    #[serde(alias = "title")]
    Titlecase,
    #[serde(alias = "sentence")]
    Sentencecase,
    #[serde(alias = "camel")]
    Camelcase,
    #[serde(alias = "kebab")]
    Kebabcase,
    #[serde(alias = "snake")]
    Snakecase,
}

impl CaseStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::Uppercase => "uppercase",
            CaseStyle::Lowercase => "lowercase",
            CaseStyle::Titlecase => "titlecase",
            CaseStyle::Sentencecase => "sentencecase",
            CaseStyle::Camelcase => "camelcase",
            CaseStyle::Kebabcase => "kebabcase",
            CaseStyle::Snakecase => "snakecase",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseRequest {
    #[serde(default)]
    pub text: String,
    pub style: CaseStyle,
}

pub fn convert(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Uppercase => uppercase(text),
        CaseStyle::Lowercase => lowercase(text),
        CaseStyle::Titlecase => titlecase(text),
        CaseStyle::Sentencecase => sentencecase(text),
        CaseStyle::Camelcase => camelcase(text),
        CaseStyle::Kebabcase => kebabcase(text),
        CaseStyle::Snakecase => snakecase(text),
    }
}

pub fn apply(request: &CaseRequest) -> TransformResult {
    TransformResult::text(convert(&request.text, request.style))
}

pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Capitalizes every run of non-whitespace and lowercases the rest of it.
pub fn titlecase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Lowercases everything, then capitalizes the first word character of the
/// text and of every run following `.`, `!` or `?`.
pub fn sentencecase(text: &str) -> String {
    let lowered = text.to_lowercase();
    re_sentence_start()
        .replace_all(&lowered, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

pub fn camelcase(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            if i == 0 {
                token.to_lowercase()
            } else {
                capitalize(token)
            }
        })
        .collect()
}

pub fn kebabcase(text: &str) -> String {
    separated(text, "-")
}

pub fn snakecase(text: &str) -> String {
    separated(text, "_")
}

fn separated(text: &str, separator: &str) -> String {
    let split = re_case_boundary().replace_all(text, format!("${{1}}{separator}${{2}}").as_str());
    let lowered = split.to_lowercase();
    re_whitespace_run().replace_all(&lowered, separator).into_owned()
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_is_idempotent() {
        let samples = ["hello World", "straße", "ǅemal", "", "123 abc"];
        for s in samples {
            assert_eq!(uppercase(&uppercase(s)), uppercase(s));
            assert_eq!(lowercase(&lowercase(s)), lowercase(s));
        }
    }

    #[test]
    fn test_uppercase_is_unicode_aware() {
        assert_eq!(uppercase("straße"), "STRASSE");
        assert_eq!(lowercase("ÀÉÎ"), "àéî");
    }

    #[test]
    fn test_titlecase() {
        assert_eq!(titlecase("hELLO wORLD"), "Hello World");
        assert_eq!(titlecase("  two  spaces\tand tab"), "  Two  Spaces\tAnd Tab");
        assert_eq!(titlecase("it's o'neil"), "It's O'neil");
    }

    #[test]
    fn test_sentencecase() {
        assert_eq!(
            sentencecase("HELLO THERE. how ARE you?   fine!ok"),
            "Hello there. How are you?   Fine!Ok"
        );
        assert_eq!(sentencecase("  leading space"), "  Leading space");
    }

    #[test]
    fn test_camelcase() {
        assert_eq!(camelcase("Hello World"), "helloWorld");
        assert_eq!(camelcase("the quick-brown_fox"), "theQuickBrownFox");
        assert_eq!(camelcase("SHOUTING words"), "shoutingWords");
        assert_eq!(camelcase(""), "");
    }

    #[test]
    fn test_kebabcase() {
        assert_eq!(kebabcase("helloWorld"), "hello-world");
        assert_eq!(kebabcase("Hello World"), "hello-world");
        assert_eq!(kebabcase("version2Beta  release"), "version2-beta-release");
    }

    #[test]
    fn test_snakecase() {
        assert_eq!(snakecase("someVariableName"), "some_variable_name");
        assert_eq!(snakecase("a b\n c"), "a_b_c");
    }

    #[test]
    fn test_request_accepts_short_style_names() {
        let request: CaseRequest =
            serde_json::from_value(serde_json::json!({"text": "ab", "style": "upper"})).unwrap();
        assert_eq!(request.style, CaseStyle::Uppercase);
        assert_eq!(apply(&request), TransformResult::text("AB"));
    }
}
