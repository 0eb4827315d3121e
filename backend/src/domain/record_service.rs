//! Append and search pipelines shared by the expense and funding ledgers.
use chrono::Datelike;
use shared::RecordKind;
use std::sync::Arc;
use tracing::info;

use crate::domain::{
    clock::Clock,
    commands::records::{AddRecordCommand, AddRecordResult, SearchRecordsQuery, SearchRecordsResult},
    models::{
        record::{Record, RecordValidationError},
        vocabulary::ALL_SENTINEL,
    },
};
use crate::storage::{Connection, RecordStorage};

#[derive(Debug, thiserror::Error)]
pub enum RecordServiceError {
    #[error(transparent)]
    Validation(#[from] RecordValidationError),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
    #[error("Total of {count} matching {kind} records is out of range")]
    TotalOutOfRange { kind: RecordKind, count: usize },
}

#[derive(Clone)]
pub struct RecordService<C: Connection> {
    record_repository: C::RecordRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> RecordService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        let record_repository = connection.create_record_repository();
        Self {
            record_repository,
            clock,
        }
    }

    /// Stamp the record with today's date and append it to the store of that
    /// date's year. The clock is read once so the two always agree.
    pub async fn add_record(
        &self,
        command: AddRecordCommand,
    ) -> Result<AddRecordResult, RecordServiceError> {
        let today = self.clock.today();
        let year = today.year();
        let record = Record {
            date: today,
            category: command.category,
            payment_method: command.payment_method,
            detail: command.detail,
            amount: command.amount,
        };

        let record_count = self
            .record_repository
            .append_record(command.kind, year, &record)
            .await?;

        info!(
            "Added {} record '{}' ({}) for {:.2}, store now has {} rows",
            command.kind, record.category, record.payment_method, record.amount, record_count
        );

        Ok(AddRecordResult {
            record,
            record_count,
        })
    }

    /// Filter this year's store and total the amounts of the matching rows
    pub async fn search_records(
        &self,
        query: SearchRecordsQuery,
    ) -> Result<SearchRecordsResult, RecordServiceError> {
        let year = self.clock.current_year();

        let Some(records) = self.record_repository.load_records(query.kind, year).await? else {
            info!("No {} store for {}", query.kind, year);
            return Ok(SearchRecordsResult {
                kind: query.kind,
                records: Vec::new(),
                total: 0.0,
                store_found: false,
            });
        };

        let category = active_predicate(query.category.as_deref());
        let payment_method = active_predicate(query.payment_method.as_deref());

        let matching: Vec<Record> = records
            .into_iter()
            .filter(|r| query.date.map_or(true, |date| r.date == date))
            .filter(|r| category.map_or(true, |c| r.has_category(c)))
            .filter(|r| payment_method.map_or(true, |m| r.has_payment_method(m)))
            .collect();

        let total = matching.iter().fold(0.0, |sum, r| sum + r.amount);
        if !total.is_finite() {
            return Err(RecordServiceError::TotalOutOfRange {
                kind: query.kind,
                count: matching.len(),
            });
        }

        info!(
            "Search {} {:?}: {} matching rows, total {:.2}",
            query.kind,
            (query.date, category, payment_method),
            matching.len(),
            total
        );

        Ok(SearchRecordsResult {
            kind: query.kind,
            records: matching,
            total,
            store_found: true,
        })
    }
}

/// Trimmed predicate value, or `None` when it should not filter
fn active_predicate(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}
