use anyhow::{anyhow, Result};
use shared::RecordKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::record_repository::CsvRecordRepository;
use crate::storage::traits::Connection;

/// One writer lock per record kind. Appends hold it across the whole
/// read-modify-write so concurrent requests in this process cannot drop rows.
struct WriterLocks {
    expense: Mutex<()>,
    funding: Mutex<()>,
}

/// CsvConnection owns the data directory and knows where each store lives
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    writer_locks: Arc<WriterLocks>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            writer_locks: Arc::new(WriterLocks {
                expense: Mutex::new(()),
                funding: Mutex::new(()),
            }),
        })
    }

    /// Create a connection in the user's downloads folder (`~/Downloads`)
    pub fn new_default() -> Result<Self> {
        let downloads = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .ok_or_else(|| anyhow!("Could not determine the downloads directory"))?;
        Self::new(downloads)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the store file for a record kind and year, e.g. `expense-2026.csv`
    pub fn store_file_path(&self, kind: RecordKind, year: i32) -> PathBuf {
        self.base_directory.join(format!("{}-{}.csv", kind.as_str(), year))
    }

    pub(crate) fn writer_lock(&self, kind: RecordKind) -> &Mutex<()> {
        match kind {
            RecordKind::Expense => &self.writer_locks.expense,
            RecordKind::Funding => &self.writer_locks.funding,
        }
    }
}

impl Connection for CsvConnection {
    type RecordRepository = CsvRecordRepository;

    fn create_record_repository(&self) -> Self::RecordRepository {
        CsvRecordRepository::new(self.clone())
    }
}
