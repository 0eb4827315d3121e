//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. A store is the collection of
//! records of one kind for one calendar year.

use anyhow::Result;
use async_trait::async_trait;
use shared::RecordKind;

use crate::domain::models::record::Record;

/// Interface for record store operations
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Load every record of a store in insertion order.
    /// Returns `None` if the store does not exist yet.
    async fn load_records(&self, kind: RecordKind, year: i32) -> Result<Option<Vec<Record>>>;

    /// Append one record after the existing ones, creating the store if needed.
    /// Returns the number of records in the store after the append.
    async fn append_record(&self, kind: RecordKind, year: i32, record: &Record) -> Result<usize>;
}

/// Factory for repositories bound to one storage location
pub trait Connection: Send + Sync + Clone {
    type RecordRepository: RecordStorage + Clone;

    fn create_record_repository(&self) -> Self::RecordRepository;
}
