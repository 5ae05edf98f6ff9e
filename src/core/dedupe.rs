use std::collections::HashSet;

/// Natural keys (trimmed emails, casing preserved) seen so far in one run.
/// The duplicate check runs before validation, so a repeat of an invalid
/// row is still reported as a duplicate.
#[derive(Debug, Default)]
pub struct SeenKeys {
    keys: HashSet<String>,
}

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_duplicate(&self, email: &str) -> bool {
        self.keys.contains(email)
    }

    pub fn insert(&mut self, email: &str) {
        self.keys.insert(email.to_string());
    }
}
