use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::output::TransformResult;

fn re_whitespace_run() -> &'static Regex {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseMode {
    Text,
    Words,
    Letters,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReverseRequest {
    #[serde(default)]
    pub text: String,
    pub mode: ReverseMode,
}

pub fn apply(request: &ReverseRequest) -> TransformResult {
    let text = match request.mode {
        ReverseMode::Text => reverse_text(&request.text),
        ReverseMode::Words => reverse_words(&request.text),
        ReverseMode::Letters => reverse_letters(&request.text),
    };
    TransformResult::text(text)
}

pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reverses token order. Leading or trailing whitespace yields an empty
/// token, so it shows up as a single space on the opposite side.
pub fn reverse_words(text: &str) -> String {
    let mut tokens: Vec<&str> = re_whitespace_run().split(text).collect();
    tokens.reverse();
    tokens.join(" ")
}

pub fn reverse_letters(text: &str) -> String {
    re_whitespace_run()
        .split(text)
        .map(reverse_text)
        .collect::<Vec<_>>()
        .join(" ")
}
