use std::fmt;

/// What kind of input a syntax error was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Json,
    Base64,
    PercentEncoding,
    Regex,
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyntaxKind::Json => "JSON",
            SyntaxKind::Base64 => "Base64",
            SyntaxKind::PercentEncoding => "URL encoding",
            SyntaxKind::Regex => "regular expression",
        };
        f.write_str(label)
    }
}

/// Failure of a single transformation attempt.
///
/// None of these are fatal: the caller reports the message and keeps (or
/// clears) its previous output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// Malformed input syntax: JSON, base64, percent-encoding or a regex.
    #[error("Invalid {kind}: {message}")]
    Syntax { kind: SyntaxKind, message: String },

    /// The options make the request impossible to satisfy.
    #[error("{0}")]
    Configuration(String),
}

impl TransformError {
    pub fn syntax(kind: SyntaxKind, message: impl Into<String>) -> Self {
        TransformError::Syntax {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        TransformError::Configuration(message.into())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, TransformError::Syntax { .. })
    }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;

/// Failure of a [`KeyValueStore`](crate::patterns::KeyValueStore) write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message_names_the_format() {
        let err = TransformError::syntax(SyntaxKind::Json, "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Invalid JSON: expected value at line 1 column 1"
        );
        assert!(err.is_syntax());
    }

    #[test]
    fn test_configuration_error_message_is_verbatim() {
        let err = TransformError::configuration("no character classes selected");
        assert_eq!(err.to_string(), "no character classes selected");
        assert!(!err.is_syntax());
    }
}
