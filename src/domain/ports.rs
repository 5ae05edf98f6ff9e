use crate::domain::model::{AttemptOutcome, NewUser};
use async_trait::async_trait;
use std::time::Duration;

/// Configuration surface consumed by the pipeline. Implemented by both the
/// CLI and TOML configuration sources.
pub trait ImportConfig: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn input_path(&self) -> &str;
    fn audit_log_path(&self) -> &str;
    fn success_log_path(&self) -> &str;
    fn max_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
}

/// One submission attempt against the remote API. Attempt-level failures
/// are data, not errors; the retry policy lives with the caller.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> AttemptOutcome;
}
