use crate::core::dedupe::SeenKeys;
use crate::core::reporter::RunReporter;
use crate::core::submitter::submit_with_retry;
use crate::core::validator::FieldValidator;
use crate::domain::model::{RawRow, RunTally, ValidationOutcome};
use crate::domain::ports::{ImportConfig, UserGateway};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Drives one import run: reads rows in input order and resolves each one
/// fully (through submission) before moving to the next. Terminal states
/// per row: counted success, counted failure, or excluded (blank rows,
/// which never enter the tally).
pub struct UserImportPipeline<C: ImportConfig, G: UserGateway> {
    config: C,
    gateway: G,
    validator: FieldValidator,
}

impl<C: ImportConfig, G: UserGateway> UserImportPipeline<C, G> {
    pub fn new(config: C, gateway: G) -> Self {
        Self {
            config,
            gateway,
            validator: FieldValidator::new(),
        }
    }

    pub async fn run(&self) -> Result<RunTally> {
        // An unreadable input aborts before any marker or summary is written.
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(self.config.input_path())?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            // Tolerate a UTF-8 BOM on the first header.
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        tracing::debug!("input headers: {:?}", headers);

        let mut reporter = RunReporter::open(
            self.config.audit_log_path(),
            self.config.success_log_path(),
        )?;
        reporter.start(self.config.input_path())?;

        let mut seen = SeenKeys::new();
        let mut last_line = 1u64;

        for record in reader.records() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(last_line + 1);
            last_line = line;

            let fields: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            let row = RawRow::new(line, fields);

            if row.is_blank() {
                reporter.log(&format!("Row {}: blank row, skipped", line))?;
                continue;
            }

            // Duplicate suppression precedes validation; rows without an
            // email carry no natural key and fall through to validation.
            let key = row.get("email").trim().to_string();
            if !key.is_empty() {
                if seen.is_duplicate(&key) {
                    reporter.log(&format!("Row {}: duplicate email {}, not submitted", line, key))?;
                    reporter.record_failure();
                    continue;
                }
                seen.insert(&key);
            }

            match self.validator.validate(&row) {
                ValidationOutcome::Invalid(reason) => {
                    reporter.log(&format!("Row {}: {} ({:?})", line, reason, row.fields()))?;
                    reporter.record_failure();
                }
                ValidationOutcome::Valid(user) => {
                    let created = submit_with_retry(
                        &self.gateway,
                        &user,
                        line,
                        self.config.max_attempts(),
                        self.config.retry_delay(),
                        &mut reporter,
                    )
                    .await?;
                    if created {
                        reporter.record_success();
                    } else {
                        reporter.record_failure();
                    }
                }
            }
        }

        reporter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::HttpUserGateway;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::TempDir;

    struct TestConfig {
        api_endpoint: String,
        input_path: String,
        audit_log_path: String,
        success_log_path: String,
        max_attempts: u32,
    }

    impl ImportConfig for TestConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn audit_log_path(&self) -> &str {
            &self.audit_log_path
        }

        fn success_log_path(&self) -> &str {
            &self.success_log_path
        }

        fn max_attempts(&self) -> u32 {
            self.max_attempts
        }

        fn retry_delay(&self) -> Duration {
            Duration::ZERO
        }
    }

    fn setup(dir: &TempDir, endpoint: String, csv_content: &str) -> TestConfig {
        let input_path = dir.path().join("users.csv").to_str().unwrap().to_string();
        std::fs::write(&input_path, csv_content).unwrap();
        TestConfig {
            api_endpoint: endpoint,
            input_path,
            audit_log_path: dir.path().join("audit.log").to_str().unwrap().to_string(),
            success_log_path: dir.path().join("success.log").to_str().unwrap().to_string(),
            max_attempts: 3,
        }
    }

    #[tokio::test]
    async fn test_duplicate_of_invalid_row_reports_duplicate() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/create_user");
            then.status(201);
        });

        // Second row repeats the email but has a bad role; the duplicate
        // check fires first.
        let dir = TempDir::new().unwrap();
        let config = setup(
            &dir,
            server.url("/api/create_user"),
            "name,email,role\nJane Doe,dup@x.com,user\nJane Doe,dup@x.com,wizard\n",
        );
        let audit_path = config.audit_log_path.clone();

        let gateway = HttpUserGateway::new(config.api_endpoint.clone());
        let tally = UserImportPipeline::new(config, gateway).run().await.unwrap();

        api_mock.assert_hits(1);
        assert_eq!(tally.total, 2);
        assert_eq!(tally.succeeded, 1);
        assert_eq!(tally.failed, 1);

        let audit = std::fs::read_to_string(&audit_path).unwrap();
        assert!(audit.contains("Row 3: duplicate email dup@x.com"));
        assert!(!audit.contains("invalid role"));
    }

    #[tokio::test]
    async fn test_blank_rows_are_excluded_from_tally() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/create_user");
            then.status(201);
        });

        let dir = TempDir::new().unwrap();
        let config = setup(
            &dir,
            server.url("/api/create_user"),
            "name,email,role\n,,\nJane Doe,jane@example.com,user\n",
        );
        let audit_path = config.audit_log_path.clone();

        let gateway = HttpUserGateway::new(config.api_endpoint.clone());
        let tally = UserImportPipeline::new(config, gateway).run().await.unwrap();

        assert_eq!(tally.total, 1);
        assert_eq!(tally.succeeded, 1);

        let audit = std::fs::read_to_string(&audit_path).unwrap();
        assert!(audit.contains("Row 2: blank row, skipped"));
        assert!(audit.contains("Total attempted: 1"));
    }

    #[tokio::test]
    async fn test_unreadable_input_aborts_without_summary() {
        let dir = TempDir::new().unwrap();
        let audit_path = dir.path().join("audit.log").to_str().unwrap().to_string();
        let config = TestConfig {
            api_endpoint: "http://127.0.0.1:9/api/create_user".to_string(),
            input_path: dir.path().join("missing.csv").to_str().unwrap().to_string(),
            audit_log_path: audit_path.clone(),
            success_log_path: dir.path().join("success.log").to_str().unwrap().to_string(),
            max_attempts: 3,
        };

        let gateway = HttpUserGateway::new(config.api_endpoint.clone());
        let result = UserImportPipeline::new(config, gateway).run().await;

        assert!(result.is_err());
        assert!(!std::path::Path::new(&audit_path).exists());
    }
}
