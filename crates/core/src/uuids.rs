use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Result, TransformError};
use crate::output::TransformResult;

/// How many identifiers one generation produces unless asked otherwise.
pub const BATCH_SIZE: usize = 10;

/// Largest batch a single request may ask for.
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct UuidRequest {
    pub count: usize,
}

impl Default for UuidRequest {
    fn default() -> Self {
        UuidRequest { count: BATCH_SIZE }
    }
}

pub fn apply(request: &UuidRequest) -> Result<TransformResult> {
    if !(1..=MAX_BATCH_SIZE).contains(&request.count) {
        return Err(TransformError::configuration(format!(
            "UUID count must be between 1 and {MAX_BATCH_SIZE}"
        )));
    }
    Ok(TransformResult::list(generate(request.count)))
}

/// Random (version 4) UUIDs in hyphenated lowercase form.
pub fn generate(count: usize) -> Vec<String> {
    (0..count).map(|_| Uuid::new_v4().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_batch_is_ten_distinct_v4_uuids() {
        let result = apply(&UuidRequest::default()).unwrap();
        let crate::output::Output::List { items } = result.output else {
            panic!("expected a list output");
        };
        assert_eq!(items.len(), BATCH_SIZE);

        let unique: HashSet<_> = items.iter().collect();
        assert_eq!(unique.len(), BATCH_SIZE);

        for item in &items {
            let parsed = Uuid::parse_str(item).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
            assert_eq!(item.len(), 36);
        }
    }

    #[test]
    fn test_copy_all_joins_with_newlines() {
        let result = apply(&UuidRequest { count: 3 }).unwrap();
        assert_eq!(result.to_plain_text().lines().count(), 3);
    }

    #[test]
    fn test_count_is_bounded() {
        assert!(apply(&UuidRequest { count: 0 }).is_err());
        assert!(apply(&UuidRequest { count: MAX_BATCH_SIZE + 1 }).is_err());
        assert!(apply(&UuidRequest { count: 100_000 }).is_err());

        let largest = apply(&UuidRequest { count: MAX_BATCH_SIZE }).unwrap();
        assert_eq!(largest.to_plain_text().lines().count(), MAX_BATCH_SIZE);
        assert_eq!(
            apply(&UuidRequest { count: 0 }).unwrap_err().to_string(),
            "UUID count must be between 1 and 100"
        );
    }
}
