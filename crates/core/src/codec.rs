use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntaxKind, TransformError};
use crate::output::TransformResult;

/// Standard alphabet that tolerates missing padding and non-zero trailing
/// bits, like a browser's `atob`.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Characters `encodeURIComponent` leaves alone that `urlencoding` escapes.
const EXTRA_UNRESERVED: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecOp {
    B64Encode,
    B64Decode,
    UrlEncode,
    UrlDecode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodecRequest {
    #[serde(default)]
    pub text: String,
    pub operation: CodecOp,
}

pub fn apply(request: &CodecRequest) -> Result<TransformResult> {
    let text = &request.text;
    let output = match request.operation {
        CodecOp::B64Encode => base64_encode(text),
        CodecOp::B64Decode => base64_decode(text)?,
        CodecOp::UrlEncode => percent_encode(text),
        CodecOp::UrlDecode => percent_decode(text)?,
    };
    Ok(TransformResult::text(output))
}

pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decodes standard base64, ignoring ASCII whitespace.
///
/// The decoded bytes must be UTF-8.
pub fn base64_decode(text: &str) -> Result<String> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = FORGIVING
        .decode(compact.as_bytes())
        .map_err(|e| TransformError::syntax(SyntaxKind::Base64, e.to_string()))?;

    String::from_utf8(bytes).map_err(|_| {
        TransformError::syntax(SyntaxKind::Base64, "decoded bytes are not valid UTF-8 text")
    })
}

/// Escapes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn percent_encode(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escape, literal) in EXTRA_UNRESERVED {
        encoded = encoded.replace(escape, literal);
    }
    encoded
}

/// Reverses [`percent_encode`]. Every `%` must start a two-digit hex escape
/// and the escaped bytes must form UTF-8.
pub fn percent_decode(text: &str) -> Result<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return Err(malformed_uri());
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| malformed_uri())
}

fn malformed_uri() -> TransformError {
    TransformError::syntax(SyntaxKind::PercentEncoding, "URI malformed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        for s in ["", "a", "ab", "abc", "Hello, World!", "héllo 😀", "line\nbreak\0"] {
            assert_eq!(base64_decode(&base64_encode(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_base64_encode_known_value() {
        assert_eq!(base64_encode("Hello"), "SGVsbG8=");
    }

    #[test]
    fn test_base64_decode_is_forgiving_about_padding_and_whitespace() {
        assert_eq!(base64_decode("SGVs bG8").unwrap(), "Hello");
        assert_eq!(base64_decode("SGVs\nbG8=").unwrap(), "Hello");
    }

    #[test]
    fn test_base64_decode_rejects_invalid_alphabet() {
        let err = base64_decode("SGV$bG8=").unwrap_err();
        assert!(matches!(
            err,
            TransformError::Syntax {
                kind: SyntaxKind::Base64,
                ..
            }
        ));
    }

    #[test]
    fn test_base64_decode_rejects_bad_length() {
        assert!(base64_decode("A").is_err());
    }

    #[test]
    fn test_base64_decode_rejects_non_utf8() {
        // 0xFF 0xFE
        assert!(base64_decode("//4=").is_err());
    }

    #[test]
    fn test_percent_encode_matches_uri_component_rules() {
        assert_eq!(
            percent_encode("a b&c=d/é!*'()~-_."),
            "a%20b%26c%3Dd%2F%C3%A9!*'()~-_."
        );
    }

    #[test]
    fn test_percent_encode_escapes_literal_percent() {
        assert_eq!(percent_encode("100%21"), "100%2521");
    }

    #[test]
    fn test_percent_round_trip() {
        for s in ["", "plain", "a b+c", "100%", "日本語 ?&=#", "(!*')"] {
            assert_eq!(percent_decode(&percent_encode(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_percent_decode_leaves_plus_alone() {
        assert_eq!(percent_decode("a+b%20c").unwrap(), "a+b c");
    }

    #[test]
    fn test_percent_decode_rejects_malformed_escapes() {
        for bad in ["%", "%2", "%zz", "abc%4", "%E0%A4%A"] {
            let err = percent_decode(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid URL encoding: URI malformed");
        }
    }

    #[test]
    fn test_percent_decode_rejects_invalid_utf8() {
        assert!(percent_decode("%C3%28").is_err());
    }

    #[test]
    fn test_apply_dispatches_operation() {
        let request = CodecRequest {
            text: "SGVsbG8=".to_string(),
            operation: CodecOp::B64Decode,
        };
        assert_eq!(apply(&request).unwrap().to_plain_text(), "Hello");
    }
}
