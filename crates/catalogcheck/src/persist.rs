use std::fs;
use std::path::PathBuf;

use catalogcheck_core::report::Report;

use crate::prelude::*;

/// Default location of the persisted report.
pub const DEFAULT_REPORT_PATH: &str = "api_test_report.json";

/// Destination for a finished report.
pub trait ReportSink {
    fn persist(&self, report: &Report) -> Result<(), Error>;

    /// Human-readable description of where reports end up.
    fn location(&self) -> String;
}

/// Writes the report as pretty-printed JSON, overwriting any previous file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn failure(&self, reason: impl ToString) -> Error {
        Error::Persistence {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl ReportSink for FileSink {
    fn persist(&self, report: &Report) -> Result<(), Error> {
        let json = report.to_json_pretty().map_err(|e| self.failure(e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.failure(e))?;
            }
        }

        fs::write(&self.path, json).map_err(|e| self.failure(e))?;
        log::info!("Report written to {}", self.path.display());

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
