use serde::{Deserialize, Serialize};

use crate::output::{Output, TransformResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub text: String,
    pub changed: bool,
}

impl DiffLine {
    pub fn new(text: impl Into<String>, changed: bool) -> Self {
        DiffLine {
            text: text.into(),
            changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub left: Vec<DiffLine>,
    pub right: Vec<DiffLine>,
}

impl LineDiff {
    pub fn changed_lines(&self) -> usize {
        self.left.iter().filter(|line| line.changed).count()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiffRequest {
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
}

pub fn apply(request: &DiffRequest) -> TransformResult {
    let diff = compare_lines(&request.left, &request.right);
    let status = format!("{} line(s) differ.", diff.changed_lines());
    TransformResult {
        output: Output::Diff {
            left: diff.left,
            right: diff.right,
        },
        status: Some(status),
    }
}

/// Positional comparison: line `i` of one side is only ever compared with
/// line `i` of the other. The shorter side is padded with empty lines.
pub fn compare_lines(left: &str, right: &str) -> LineDiff {
    let left_lines: Vec<&str> = left.split('\n').collect();
    let right_lines: Vec<&str> = right.split('\n').collect();
    let total = left_lines.len().max(right_lines.len());

    let (left, right): (Vec<DiffLine>, Vec<DiffLine>) = (0..total)
        .map(|i| {
            let l = left_lines.get(i).copied().unwrap_or_default();
            let r = right_lines.get(i).copied().unwrap_or_default();
            let changed = l != r;
            (DiffLine::new(l, changed), DiffLine::new(r, changed))
        })
        .unzip();

    LineDiff { left, right }
}
