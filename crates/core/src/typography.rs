use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::output::TransformResult;

const LEFT_SINGLE: &str = "\u{2018}";
const RIGHT_SINGLE: &str = "\u{2019}";
const LEFT_DOUBLE: &str = "\u{201c}";
const RIGHT_DOUBLE: &str = "\u{201d}";
const EM_DASH: &str = "\u{2014}";
const EN_DASH: &str = "\u{2013}";

// A single quote opens at the start of the text or after a hyphen, em dash,
// whitespace, an opening bracket or a double quote. A double quote only opens
// when written as `_"` in one of those positions; the underscore is consumed.
fn re_opening_single() -> &'static Regex {
    static OPENING_SINGLE: OnceLock<Regex> = OnceLock::new();
    OPENING_SINGLE.get_or_init(|| Regex::new(r#"(^|[-\x{2014}\s(\["])'"#).expect("opening single regex"))
}

fn re_opening_double() -> &'static Regex {
    static OPENING_DOUBLE: OnceLock<Regex> = OnceLock::new();
    OPENING_DOUBLE.get_or_init(|| {
        Regex::new(r#"(^|[-\x{2014}\s(\["])_""#).expect("opening double regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypographyOp {
    ToSmartQuotes,
    ToStraightQuotes,
    StandardizeDashes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypographyRequest {
    #[serde(default)]
    pub text: String,
    pub operation: TypographyOp,
}

pub fn apply(request: &TypographyRequest) -> TransformResult {
    let text = match request.operation {
        TypographyOp::ToSmartQuotes => to_smart_quotes(&request.text),
        TypographyOp::ToStraightQuotes => to_straight_quotes(&request.text),
        TypographyOp::StandardizeDashes => standardize_dashes(&request.text),
    };
    TransformResult::text(text)
}

/// Curls straight quotes with four ordered substitutions: opening singles,
/// remaining singles, `_"` openers, remaining doubles.
///
/// The order matters. A double quote directly before an apostrophe counts as
/// an opening context for it, and converting the doubles first would change
/// that. A plain `"` always becomes a closing quote.
pub fn to_smart_quotes(text: &str) -> String {
    let text = re_opening_single().replace_all(text, format!("${{1}}{LEFT_SINGLE}").as_str());
    let text = text.replace('\'', RIGHT_SINGLE);
    let text = re_opening_double().replace_all(&text, format!("${{1}}{LEFT_DOUBLE}").as_str());
    text.replace('"', RIGHT_DOUBLE)
}

pub fn to_straight_quotes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
}

/// `--` becomes an em dash, then every remaining `-` an en dash.
pub fn standardize_dashes(text: &str) -> String {
    text.replace("--", EM_DASH).replace('-', EN_DASH)
}
