use sillytext_core::error::StoreError;
use sillytext_core::patterns::PatternError;
use sillytext_core::TransformError;

/// Failures surfaced to whoever invoked a tool, from any front end.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
