/// Test utilities for CSV storage tests.
///
/// `TestEnvironment` owns a temporary data directory that is removed when the
/// environment is dropped, even if the test panics.
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::record::Record;

pub struct TestEnvironment {
    /// Kept alive so the directory is not removed early
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("ledger-test-")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

/// Date every test clock is pinned to
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid test date")
}

pub fn sample_record(category: &str, payment_method: &str, amount: f64) -> Record {
    Record {
        date: test_today(),
        category: category.to_string(),
        payment_method: payment_method.to_string(),
        detail: "lunch".to_string(),
        amount,
    }
}
