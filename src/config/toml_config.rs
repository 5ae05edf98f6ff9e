use crate::domain::ports::ImportConfig;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File-based configuration, an alternative to CLI flags:
///
/// ```toml
/// [api]
/// endpoint = "https://example.com/api/create_user"
/// max_attempts = 3
/// retry_delay_seconds = 2
///
/// [input]
/// file = "users.csv"
///
/// [logs]
/// audit = "runlogs.log"
/// success = "created_users.log"
/// ```
///
/// Values may reference environment variables as `${VAR}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub input: InputConfig,
    pub logs: Option<LogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub max_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub audit: Option<String>,
    pub success: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with the corresponding environment
    /// variable; an unset variable is a configuration error.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        let mut missing = Vec::new();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.push(var_name.to_string());
                    String::new()
                }
            }
        });

        if let Some(var) = missing.into_iter().next() {
            return Err(ImportError::MissingConfigError {
                field: format!("environment variable {}", var),
            });
        }

        Ok(result.into_owned())
    }
}

impl ImportConfig for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn input_path(&self) -> &str {
        &self.input.file
    }

    fn audit_log_path(&self) -> &str {
        self.logs
            .as_ref()
            .and_then(|logs| logs.audit.as_deref())
            .unwrap_or("runlogs.log")
    }

    fn success_log_path(&self) -> &str {
        self.logs
            .as_ref()
            .and_then(|logs| logs.success.as_deref())
            .unwrap_or("created_users.log")
    }

    fn max_attempts(&self) -> u32 {
        self.api.max_attempts.unwrap_or(3)
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.api.retry_delay_seconds.unwrap_or(2))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api.endpoint)?;
        validate_path("input.file", &self.input.file)?;
        validate_path("logs.audit", self.audit_log_path())?;
        validate_path("logs.success", self.success_log_path())?;
        validate_positive_number("api.max_attempts", self.max_attempts() as u64, 1)?;
        Ok(())
    }
}
