//! Find-and-replace over literal strings or regular expressions.
//!
//! Every match is replaced. Matching is case-insensitive unless
//! `case_sensitive` is set. Replacement strings follow JavaScript's
//! `String.replace` tokens (`$1`, `$&`, `$<name>`, `$$`); the regex crate's
//! braced `${name}` form works as well.

use regex::RegexBuilder;
use serde::Deserialize;

use crate::error::{Result, SyntaxKind, TransformError};
use crate::output::TransformResult;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindReplaceRequest {
    pub text: String,
    pub find: String,
    pub replace: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

pub fn apply(request: &FindReplaceRequest) -> Result<TransformResult> {
    replace_all(request).map(TransformResult::text)
}

pub fn replace_all(request: &FindReplaceRequest) -> Result<String> {
    if request.find.is_empty() {
        return Ok(request.text.clone());
    }

    let pattern = build_pattern(&request.find, request.regex, request.whole_word);
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(!request.case_sensitive)
        .build()
        .map_err(|e| TransformError::syntax(SyntaxKind::Regex, e.to_string()))?;

    let replacement = expand_replacement(&request.replace, matcher.captures_len() - 1);
    Ok(matcher
        .replace_all(&request.text, replacement.as_str())
        .into_owned())
}

/// The find string taken verbatim in regex mode, escaped otherwise, and
/// wrapped in `\b` anchors for whole-word matching.
pub fn build_pattern(find: &str, regex: bool, whole_word: bool) -> String {
    let pattern = if regex {
        find.to_string()
    } else {
        regex::escape(find)
    };

    if whole_word {
        format!(r"\b{pattern}\b")
    } else {
        pattern
    }
}

/// Translates the JavaScript replacement tokens into the regex crate's
/// syntax. `$&` becomes `${0}`, `$<name>` becomes `${name}` and `$n`/`$nn`
/// become braced group references, so `$1_id` keeps `_id` as literal text.
///
/// A numbered reference picks the two-digit group when it exists, then the
/// one-digit group; otherwise the `$` is literal. `$$` passes through.
fn expand_replacement(replacement: &str, groups: usize) -> String {
    let chars: Vec<char> = replacement.chars().collect();
    let mut out = String::with_capacity(replacement.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.get(i).copied() {
            Some('$') => {
                out.push_str("$$");
                i += 1;
            }
            Some('&') => {
                out.push_str("${0}");
                i += 1;
            }
            Some(first) if first.is_ascii_digit() => {
                let one = first.to_digit(10).unwrap_or(0) as usize;
                let two = chars
                    .get(i + 1)
                    .and_then(|next| next.to_digit(10))
                    .map(|second| one * 10 + second as usize);

                match two {
                    Some(n) if (1..=groups).contains(&n) => {
                        out.push_str(&format!("${{{n}}}"));
                        i += 2;
                    }
                    _ if (1..=groups).contains(&one) => {
                        out.push_str(&format!("${{{one}}}"));
                        i += 1;
                    }
                    _ => out.push_str("$$"),
                }
            }
            Some('<') => match chars[i..].iter().position(|&ch| ch == '>') {
                Some(end) => {
                    let name: String = chars[i + 1..i + end].iter().collect();
                    out.push_str(&format!("${{{name}}}"));
                    i += end + 1;
                }
                None => out.push_str("$$"),
            },
            _ => out.push('$'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, find: &str, replace: &str) -> FindReplaceRequest {
        FindReplaceRequest {
            text: text.to_string(),
            find: find.to_string(),
            replace: replace.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_literal_replace_touches_substrings() {
        let req = request("cat cats scatter", "cat", "dog");
        assert_eq!(replace_all(&req).unwrap(), "dog dogs sdogter");
    }

    #[test]
    fn test_whole_word_only_replaces_isolated_words() {
        let req = FindReplaceRequest {
            whole_word: true,
            ..request("cat cats scatter", "cat", "dog")
        };
        assert_eq!(replace_all(&req).unwrap(), "dog cats scatter");
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let req = request("Cat CAT cat", "cat", "x");
        assert_eq!(replace_all(&req).unwrap(), "x x x");

        let sensitive = FindReplaceRequest {
            case_sensitive: true,
            ..request("Cat CAT cat", "cat", "x")
        };
        assert_eq!(replace_all(&sensitive).unwrap(), "Cat CAT x");
    }

    #[test]
    fn test_literal_mode_escapes_metacharacters() {
        let req = request("a.b axb (a.b)", "(a.b)", "_");
        assert_eq!(replace_all(&req).unwrap(), "a.b axb _");
    }

    #[test]
    fn test_regex_mode_with_capture_groups() {
        let req = FindReplaceRequest {
            regex: true,
            ..request(
                "\"apiKey\": \"old_api_key_123\", \"k\": \"old_api_key_456\"",
                r"old_api_key_(\d+)",
                "NEW_${1}",
            )
        };
        assert_eq!(
            replace_all(&req).unwrap(),
            "\"apiKey\": \"NEW_123\", \"k\": \"NEW_456\""
        );
    }

    #[test]
    fn test_whole_match_token() {
        let req = FindReplaceRequest {
            regex: true,
            ..request("one two", r"\w+", "[$&]")
        };
        assert_eq!(replace_all(&req).unwrap(), "[one] [two]");

        let escaped = request("x", "x", "$$&");
        assert_eq!(replace_all(&escaped).unwrap(), "$&");
    }

    #[test]
    fn test_numbered_group_followed_by_word_characters() {
        let req = FindReplaceRequest {
            regex: true,
            ..request("key_123 key_45", r"key_(\d+)", "$1_id")
        };
        assert_eq!(replace_all(&req).unwrap(), "123_id 45_id");

        let prefixed = FindReplaceRequest {
            regex: true,
            ..request("old_api_key_7", r"old_api_key_(\d+)", "NEW_$1_suffix")
        };
        assert_eq!(replace_all(&prefixed).unwrap(), "NEW_7_suffix");
    }

    #[test]
    fn test_numbered_references_follow_existing_groups() {
        let req = FindReplaceRequest {
            regex: true,
            ..request("ab", "(a)(b)", "$2$1$10$3$0")
        };
        // `$10` falls back to `$1` + "0"; `$3` and `$0` name no group.
        assert_eq!(replace_all(&req).unwrap(), "baa0$3$0");
    }

    #[test]
    fn test_named_group_reference() {
        let req = FindReplaceRequest {
            regex: true,
            ..request("2024-05", r"(?<year>\d{4})-(?<month>\d{2})", "$<month>/$<year>")
        };
        assert_eq!(replace_all(&req).unwrap(), "05/2024");
    }

    #[test]
    fn test_empty_find_returns_input() {
        let req = request("unchanged", "", "anything");
        assert_eq!(replace_all(&req).unwrap(), "unchanged");
    }

    #[test]
    fn test_invalid_regex_is_a_syntax_error() {
        let req = FindReplaceRequest {
            regex: true,
            ..request("text", "(unclosed", "x")
        };
        let err = apply(&req).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Syntax {
                kind: SyntaxKind::Regex,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Invalid regular expression:"));
    }
}
