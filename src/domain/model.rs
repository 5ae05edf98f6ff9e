use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One data row as read from the input file, keyed by header name.
/// `line` is the physical line number in the file (header is line 1),
/// carried only for log traceability.
#[derive(Debug, Clone)]
pub struct RawRow {
    line: u64,
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(line: u64, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    /// Returns the raw value for a field, or "" when the column is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// A structurally blank row: every cell empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

/// A validated, normalized user ready for submission. Serialized as the
/// JSON request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(NewUser),
    Invalid(String),
}

/// Result of a single submission attempt against the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Created,
    Rejected(u16),
    Transport(String),
}

/// Run-level counters. `total` counts every row that reached a terminal
/// success/failure state; blank rows never enter the tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl RunTally {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }
}
