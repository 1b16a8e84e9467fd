//! Response Classification
//!
//! The plugin answers every request with a one-line body that is either
//! `<result>TEXT</result>` or `<error>TEXT</error>`, with TEXT restricted to
//! letters, digits and spaces. This is not XML parsing: only those two whole
//! string shapes are recognized, anything else is reported as unrecognized so
//! the caller knows the outcome could not be verified.

use serde::{ Deserialize, Serialize };

/// Classified outcome of one UserService request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Body matched `<result>...</result>`; carries the full matched tag text
    Success {
        message: String,
    },
    /// Body matched `<error>...</error>`; carries the full matched tag text
    Failure {
        message: String,
    },
    /// Body matched neither shape
    Unrecognized,
}

impl Outcome {
    /// Whether the server confirmed the operation
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

fn tag_payload<'a>(body: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let inner = body.strip_prefix(open)?.strip_suffix(close)?;
    if inner.is_empty() {
        return None;
    }
    if inner.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        Some(inner)
    } else {
        None
    }
}

/// Classify a raw response body. The match must span the entire string; no
/// trimming is applied.
pub fn classify(body: &str) -> Outcome {
    if tag_payload(body, "<error>", "</error>").is_some() {
        return Outcome::Failure { message: body.to_string() };
    }
    if tag_payload(body, "<result>", "</result>").is_some() {
        return Outcome::Success { message: body.to_string() };
    }
    tracing::debug!("unrecognized response body ({} bytes)", body.len());
    Outcome::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_tag_is_success() {
        assert_eq!(classify("<result>ok</result>"), Outcome::Success {
            message: "<result>ok</result>".to_string(),
        });
    }

    #[test]
    fn error_tag_is_failure() {
        assert_eq!(classify("<error>bad secret</error>"), Outcome::Failure {
            message: "<error>bad secret</error>".to_string(),
        });
    }

    #[test]
    fn anything_else_is_unrecognized() {
        assert_eq!(classify("garbage"), Outcome::Unrecognized);
        assert_eq!(classify(""), Outcome::Unrecognized);
        assert_eq!(classify("<result></result>"), Outcome::Unrecognized);
        assert_eq!(classify("<result>ok</result>\n"), Outcome::Unrecognized);
        assert_eq!(classify(" <result>ok</result>"), Outcome::Unrecognized);
        assert_eq!(classify("<result>ok!</result>"), Outcome::Unrecognized);
        assert_eq!(classify("<warning>ok</warning>"), Outcome::Unrecognized);
    }

    #[test]
    fn payload_allows_letters_digits_and_spaces_only() {
        assert_eq!(
            classify("<result>User 42 created</result>").is_success(),
            true
        );
        assert_eq!(classify("<result>a&b</result>"), Outcome::Unrecognized);
    }
}
