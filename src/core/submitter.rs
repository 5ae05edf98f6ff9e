use crate::core::reporter::RunReporter;
use crate::domain::model::{AttemptOutcome, NewUser};
use crate::domain::ports::UserGateway;
use crate::utils::error::Result;
use std::time::Duration;

/// Submits one validated user with bounded retry. Returns true as soon as
/// an attempt reports the resource created; between failed attempts the
/// pipeline blocks for the fixed backoff. Exhausting the attempts returns
/// false with no extra record beyond the per-attempt log lines.
pub async fn submit_with_retry<G: UserGateway>(
    gateway: &G,
    user: &NewUser,
    row: u64,
    max_attempts: u32,
    retry_delay: Duration,
    reporter: &mut RunReporter,
) -> Result<bool> {
    for attempt in 1..=max_attempts {
        match gateway.create_user(user).await {
            AttemptOutcome::Created => {
                reporter.success_entry(row, &user.email)?;
                return Ok(true);
            }
            AttemptOutcome::Rejected(status) => {
                reporter.log(&format!(
                    "Row {}: attempt {}/{} failed for {}: HTTP {}",
                    row, attempt, max_attempts, user.email, status
                ))?;
            }
            AttemptOutcome::Transport(cause) => {
                reporter.log(&format!(
                    "Row {}: attempt {}/{} failed for {}: {}",
                    row, attempt, max_attempts, user.email, cause
                ))?;
            }
        }
        if attempt < max_attempts {
            tokio::time::sleep(retry_delay).await;
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Plays back a scripted sequence of attempt outcomes.
    struct ScriptedGateway {
        outcomes: Mutex<Vec<AttemptOutcome>>,
        calls: Mutex<u32>,
    }

    impl ScriptedGateway {
        fn new(outcomes: Vec<AttemptOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl UserGateway for ScriptedGateway {
        async fn create_user(&self, _user: &NewUser) -> AttemptOutcome {
            *self.calls.lock().unwrap() += 1;
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                AttemptOutcome::Rejected(500)
            } else {
                outcomes.remove(0)
            }
        }
    }

    fn user() -> NewUser {
        NewUser {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn reporter(dir: &TempDir) -> (RunReporter, String, String) {
        let audit = dir.path().join("audit.log").to_str().unwrap().to_string();
        let success = dir.path().join("success.log").to_str().unwrap().to_string();
        (RunReporter::open(&audit, &success).unwrap(), audit, success)
    }

    #[tokio::test]
    async fn test_first_attempt_created_stops_retrying() {
        let dir = TempDir::new().unwrap();
        let (mut reporter, _, success_path) = reporter(&dir);
        let gateway = ScriptedGateway::new(vec![AttemptOutcome::Created]);

        let created = submit_with_retry(&gateway, &user(), 2, 3, Duration::ZERO, &mut reporter)
            .await
            .unwrap();

        assert!(created);
        assert_eq!(gateway.calls(), 1);
        drop(reporter);
        let success = std::fs::read_to_string(&success_path).unwrap();
        assert!(success.contains("jane@example.com"));
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_false() {
        let dir = TempDir::new().unwrap();
        let (mut reporter, audit_path, success_path) = reporter(&dir);
        let gateway = ScriptedGateway::new(vec![
            AttemptOutcome::Rejected(500),
            AttemptOutcome::Rejected(503),
            AttemptOutcome::Rejected(500),
        ]);

        let created = submit_with_retry(&gateway, &user(), 4, 3, Duration::ZERO, &mut reporter)
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(gateway.calls(), 3);
        drop(reporter);
        let audit = std::fs::read_to_string(&audit_path).unwrap();
        assert!(audit.contains("Row 4: attempt 1/3 failed for jane@example.com: HTTP 500"));
        assert!(audit.contains("Row 4: attempt 2/3 failed for jane@example.com: HTTP 503"));
        assert!(audit.contains("Row 4: attempt 3/3 failed for jane@example.com: HTTP 500"));
        let success = std::fs::read_to_string(&success_path).unwrap();
        assert!(success.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_then_success() {
        let dir = TempDir::new().unwrap();
        let (mut reporter, audit_path, _) = reporter(&dir);
        let gateway = ScriptedGateway::new(vec![
            AttemptOutcome::Transport("connection reset".to_string()),
            AttemptOutcome::Created,
        ]);

        let created = submit_with_retry(&gateway, &user(), 2, 3, Duration::ZERO, &mut reporter)
            .await
            .unwrap();

        assert!(created);
        assert_eq!(gateway.calls(), 2);
        drop(reporter);
        let audit = std::fs::read_to_string(&audit_path).unwrap();
        assert!(audit.contains("attempt 1/3 failed for jane@example.com: connection reset"));
    }
}
