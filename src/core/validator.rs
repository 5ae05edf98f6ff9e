use crate::domain::model::{NewUser, RawRow, ValidationOutcome};
use regex::Regex;

pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "role"];
pub const ALLOWED_ROLES: [&str; 3] = ["admin", "user", "moderator"];

/// Per-row field validation. Rules run in a fixed order and short-circuit
/// on the first failure; a passing row comes back normalized (name and
/// email trimmed, role trimmed and lower-cased).
pub struct FieldValidator {
    name_re: Regex,
    email_re: Regex,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self {
            // Letters, spaces, apostrophes, and hyphens only.
            name_re: Regex::new(r"^[A-Za-z' -]+$").unwrap(),
            // local@domain.tld, with at least one dot after the @.
            email_re: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap(),
        }
    }

    pub fn validate(&self, row: &RawRow) -> ValidationOutcome {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .filter(|field| row.get(field).trim().is_empty())
            .copied()
            .collect();
        if !missing.is_empty() {
            return ValidationOutcome::Invalid(format!("missing fields: {}", missing.join(", ")));
        }

        let name = row.get("name").trim();
        if !self.name_re.is_match(name) {
            return ValidationOutcome::Invalid("invalid name format".to_string());
        }

        let email = row.get("email").trim();
        if !self.email_re.is_match(email) {
            return ValidationOutcome::Invalid("invalid email format".to_string());
        }

        let role = row.get("role").trim().to_lowercase();
        if !ALLOWED_ROLES.contains(&role.as_str()) {
            return ValidationOutcome::Invalid("invalid role".to_string());
        }

        ValidationOutcome::Valid(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role,
        })
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}
