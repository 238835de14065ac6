use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::output::{Output, TransformResult};

fn re_word() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").expect("word regex"))
}

/// Live statistics for a block of text.
///
/// Character figures are UTF-16 code units so they agree with what a browser
/// text field reports for the same content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_without_spaces: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CounterRequest {
    #[serde(default)]
    pub text: String,
}

pub fn apply(request: &CounterRequest) -> TransformResult {
    TransformResult {
        output: Output::Stats(stats(&request.text)),
        status: None,
    }
}

pub fn stats(text: &str) -> TextStats {
    TextStats {
        words: word_count(text),
        characters: character_count(text),
        characters_without_spaces: character_count_without_whitespace(text),
        lines: line_count(text),
    }
}

pub fn word_count(text: &str) -> usize {
    re_word().find_iter(text).count()
}

pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn character_count_without_whitespace(text: &str) -> usize {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(char::len_utf16)
        .sum()
}

/// Counts `\n`-separated lines.
///
/// Blank lines only count once the text ends with a newline; until then
/// they are treated as trailing noise.
pub fn line_count(text: &str) -> usize {
    let ends_with_newline = text.ends_with('\n');
    text.split('\n')
        .filter(|line| ends_with_newline || !line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_all_zero() {
        assert_eq!(stats(""), TextStats::default());
    }

    #[test]
    fn test_word_count_uses_ascii_word_runs() {
        assert_eq!(word_count("Hello, world! it's snake_case 42"), 6);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("héllo"), 2);
    }

    #[test]
    fn test_character_counts() {
        assert_eq!(character_count("a b\tc"), 5);
        assert_eq!(character_count_without_whitespace("a b\tc\n"), 3);
        assert_eq!(character_count("😀"), 2);
    }

    #[test]
    fn test_line_count_without_trailing_newline_skips_blank_lines() {
        assert_eq!(line_count("one\n\ntwo"), 2);
        assert_eq!(line_count("one\n   \ntwo"), 2);
        assert_eq!(line_count("single"), 1);
    }

    #[test]
    fn test_line_count_with_trailing_newline_counts_every_segment() {
        assert_eq!(line_count("one\n"), 2);
        assert_eq!(line_count("one\n\ntwo\n"), 4);
        assert_eq!(line_count("\n"), 2);
    }

    #[test]
    fn test_apply_reports_stats() {
        let result = apply(&CounterRequest {
            text: "two words\n".to_string(),
        });
        assert_eq!(
            result.output,
            Output::Stats(TextStats {
                words: 2,
                characters: 10,
                characters_without_spaces: 8,
                lines: 2,
            })
        );
    }
}
