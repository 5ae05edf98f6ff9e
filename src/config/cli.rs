use crate::domain::ports::ImportConfig;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "user-import")]
#[command(about = "Bulk-create users from a CSV file against a remote HTTP API")]
pub struct CliConfig {
    /// CSV file with a header row naming at least name, email, role
    #[arg(long, default_value = "users.csv")]
    pub input: String,

    #[arg(long, default_value = "https://example.com/api/create_user")]
    pub api_endpoint: String,

    /// Append-only audit log (skips, duplicates, attempt failures, summary)
    #[arg(long, default_value = "runlogs.log")]
    pub log_file: String,

    /// Append-only log of successful creations
    #[arg(long, default_value = "created_users.log")]
    pub success_log: String,

    #[arg(long, default_value = "3")]
    pub max_attempts: u32,

    #[arg(long, default_value = "2")]
    pub retry_delay_seconds: u64,

    #[arg(long, help = "Load settings from a TOML file instead of CLI flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ImportConfig for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn input_path(&self) -> &str {
        &self.input
    }

    fn audit_log_path(&self) -> &str {
        &self.log_file
    }

    fn success_log_path(&self) -> &str {
        &self.success_log
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("input", &self.input)?;
        validate_path("log_file", &self.log_file)?;
        validate_path("success_log", &self.success_log)?;
        validate_positive_number("max_attempts", self.max_attempts as u64, 1)?;
        Ok(())
    }
}
