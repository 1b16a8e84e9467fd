//! Request Parameter Assembly
//!
//! Every UserService call boils down to an ordered list of name/value pairs:
//! always a `type` and the shared `secret`, then the operation's required
//! fields, then whichever optional fields pass validation. Optional fields that
//! fail validation are silently left out, the request proceeds without them.

use serde::{ Deserialize, Serialize };

/// The fixed operation vocabulary understood by the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Delete,
    Disable,
    Enable,
    Update,
    AddRoster,
    UpdateRoster,
    DeleteRoster,
}

impl Operation {
    /// Wire value sent in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Delete => "delete",
            Operation::Disable => "disable",
            Operation::Enable => "enable",
            Operation::Update => "update",
            Operation::AddRoster => "add_roster",
            Operation::UpdateRoster => "update_roster",
            Operation::DeleteRoster => "delete_roster",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered parameter mapping for one request. Built fresh per call, never
/// persisted.
#[derive(Debug, Clone)]
pub struct RequestParameters {
    pairs: Vec<(String, String)>,
}

impl RequestParameters {
    /// Start a mapping seeded with the operation `type` and the shared secret
    pub fn new(operation: Operation, secret: &str) -> Self {
        Self {
            pairs: vec![
                ("type".to_string(), operation.as_str().to_string()),
                ("secret".to_string(), secret.to_string())
            ],
        }
    }

    /// Append a required field unconditionally
    pub fn push_required(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Append a string field if it is present and non-empty
    pub fn push_string(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !value.is_empty() {
                self.pairs.push((name.to_string(), value.to_string()));
            }
        }
    }

    /// Append an email field if it is present and well-formed
    pub fn push_email(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            if is_valid_email(value) {
                self.pairs.push((name.to_string(), value.to_string()));
            } else if !value.is_empty() {
                tracing::debug!("omitting malformed email value from {} field", name);
            }
        }
    }

    /// Append a subscription code if it is present and among `allowed`
    pub fn push_subscription(&mut self, name: &str, value: Option<i32>, allowed: &[i32]) {
        if let Some(code) = value {
            if allowed.contains(&code) {
                self.pairs.push((name.to_string(), code.to_string()));
            } else {
                tracing::debug!("omitting out-of-range subscription code {}", code);
            }
        }
    }

    /// Append a groups field if the collection is non-empty, comma-joined
    pub fn push_groups(&mut self, name: &str, value: Option<&[String]>) {
        if let Some(groups) = value {
            if !groups.is_empty() {
                self.pairs.push((name.to_string(), groups.join(",")));
            }
        }
    }

    /// Value of a field, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// The pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// URL-encoded form of the mapping, preserving insertion order. Used as the
    /// POST body by the HTTP transport and as the query string by the stream
    /// fallback.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&urlencoding::encode(key));
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

/// Syntactic email check: one `@`, non-empty local part without whitespace, and
/// a dotted domain of alphanumeric/`-` labels.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(|c| c.is_whitespace() || c == '@') {
        return false;
    }
    if !domain.contains('.') {
        return false;
    }
    domain
        .split('.')
        .all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_starts_with_type_and_secret() {
        let params = RequestParameters::new(Operation::Add, "s3cret");
        assert_eq!(params.pairs()[0], ("type".to_string(), "add".to_string()));
        assert_eq!(params.pairs()[1], ("secret".to_string(), "s3cret".to_string()));
    }

    #[test]
    fn empty_strings_are_omitted() {
        let mut params = RequestParameters::new(Operation::Update, "s");
        params.push_string("name", Some(""));
        params.push_string("name", None);
        assert!(!params.contains("name"));
        params.push_string("name", Some("Jane Doe"));
        assert_eq!(params.get("name"), Some("Jane Doe"));
    }

    #[test]
    fn malformed_emails_are_omitted() {
        let mut params = RequestParameters::new(Operation::Add, "s");
        params.push_email("email", Some("not-an-email"));
        assert!(!params.contains("email"));
        params.push_email("email", Some("jane@example.org"));
        assert_eq!(params.get("email"), Some("jane@example.org"));
    }

    #[test]
    fn email_validation_rejects_bad_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example-host.org"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@ex..org"));
        assert!(!is_valid_email("us er@example.org"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn subscription_codes_outside_the_allowed_set_are_omitted() {
        let allowed = [-1, 0, 1, 2];
        let mut params = RequestParameters::new(Operation::AddRoster, "s");
        params.push_subscription("subscription", Some(5), &allowed);
        assert!(!params.contains("subscription"));
        params.push_subscription("subscription", Some(2), &allowed);
        assert_eq!(params.get("subscription"), Some("2"));
    }

    #[test]
    fn groups_are_comma_joined_in_order() {
        let mut params = RequestParameters::new(Operation::Add, "s");
        let groups = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        params.push_groups("groups", Some(&groups));
        assert_eq!(params.get("groups"), Some("a,b,c"));

        let mut params = RequestParameters::new(Operation::Add, "s");
        params.push_groups("groups", Some(&[]));
        assert!(!params.contains("groups"));
    }

    #[test]
    fn query_string_preserves_order_and_encodes() {
        let mut params = RequestParameters::new(Operation::Add, "p@ss word");
        params.push_required("username", "jane");
        assert_eq!(params.to_query_string(), "type=add&secret=p%40ss%20word&username=jane");
    }
}
