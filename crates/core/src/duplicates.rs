use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::output::TransformResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deduplicated {
    pub text: String,
    pub lines_removed: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuplicatesRequest {
    #[serde(default)]
    pub text: String,
}

/// Empty output carries no status.
pub fn apply(request: &DuplicatesRequest) -> TransformResult {
    let deduplicated = remove_duplicate_lines(&request.text);
    if deduplicated.text.is_empty() {
        return TransformResult::text(deduplicated.text);
    }

    let status = match deduplicated.lines_removed {
        0 => "No duplicates found.".to_string(),
        removed => format!("{removed} duplicate line(s) removed."),
    };
    TransformResult::text(deduplicated.text).with_status(status)
}

/// Keeps the first occurrence of every line, in input order.
pub fn remove_duplicate_lines(text: &str) -> Deduplicated {
    let mut seen = HashSet::new();
    let mut total = 0;
    let mut unique = Vec::new();

    for line in text.split('\n') {
        total += 1;
        if seen.insert(line) {
            unique.push(line);
        }
    }

    Deduplicated {
        lines_removed: total - unique.len(),
        text: unique.join("\n"),
    }
}
