use crate::domain::model::RunTally;
use crate::utils::error::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;

/// Accumulates per-row outcomes into the run tally and writes the audit
/// trail: every message goes to the append-only audit file, timestamped,
/// and is echoed to stdout. Successful creations additionally get one line
/// each in a separate success file.
pub struct RunReporter {
    audit: File,
    success: File,
    tally: RunTally,
}

fn timestamp() -> String {
    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]").to_string()
}

fn open_append(path: &str) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

impl RunReporter {
    pub fn open(audit_path: &str, success_path: &str) -> Result<Self> {
        Ok(Self {
            audit: open_append(audit_path)?,
            success: open_append(success_path)?,
            tally: RunTally::default(),
        })
    }

    /// Writes one timestamped line to the audit stream and echoes it.
    pub fn log(&mut self, message: &str) -> Result<()> {
        let line = format!("{} {}", timestamp(), message);
        writeln!(self.audit, "{}", line)?;
        println!("{}", line);
        Ok(())
    }

    /// One line per created user in the success stream.
    pub fn success_entry(&mut self, row: u64, email: &str) -> Result<()> {
        let line = format!("{} row {}: created user {}", timestamp(), row, email);
        writeln!(self.success, "{}", line)?;
        println!("{}", line);
        Ok(())
    }

    pub fn record_success(&mut self) {
        self.tally.record_success();
    }

    pub fn record_failure(&mut self) {
        self.tally.record_failure();
    }

    pub fn tally(&self) -> RunTally {
        self.tally
    }

    pub fn start(&mut self, source: &str) -> Result<()> {
        self.log(&format!("===== User import started (source: {}) =====", source))
    }

    /// Emits the end marker and summary lines, then yields the final tally.
    pub fn finish(mut self) -> Result<RunTally> {
        self.log("===== User import finished =====")?;
        self.log(&format!("Total attempted: {}", self.tally.total))?;
        self.log(&format!("Succeeded: {}", self.tally.succeeded))?;
        self.log(&format!("Failed: {}", self.tally.failed))?;
        Ok(self.tally)
    }
}
