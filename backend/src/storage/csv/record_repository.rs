use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Writer};
use shared::RecordKind;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::record::{Record, DATE_FORMAT};
use crate::storage::traits::RecordStorage;

/// Column header for the category column of each kind
pub fn category_header(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Expense => "Expense Type",
        RecordKind::Funding => "Funding Type",
    }
}

pub fn header_row(kind: RecordKind) -> [&'static str; 5] {
    ["Date", category_header(kind), "Payment Method", "Details", "Amount"]
}

/// CSV-based record repository
#[derive(Clone)]
pub struct CsvRecordRepository {
    connection: CsvConnection,
}

impl CsvRecordRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every row of a store file. The header must match the kind's
    /// columns. Rows with fewer cells are padded with empty values; unreadable
    /// dates or amounts fail the whole read.
    fn read_records(&self, kind: RecordKind, file_path: &Path) -> Result<Vec<Record>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = csv_reader
            .headers()
            .with_context(|| format!("{}: header is not valid CSV", file_path.display()))?;
        let expected = header_row(kind);
        if !headers.iter().map(str::trim).eq(expected.iter().copied()) {
            return Err(anyhow!(
                "{}: unexpected header '{}', expected '{}'",
                file_path.display(),
                headers.iter().collect::<Vec<_>>().join(","),
                expected.join(",")
            ));
        }

        let mut records = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let row = result
                .with_context(|| format!("{}: line {} is not valid CSV", file_path.display(), line))?;

            let date = parse_stored_date(row.get(0).unwrap_or("")).with_context(|| {
                format!("{}: line {} has an unreadable date", file_path.display(), line)
            })?;
            let amount = parse_stored_amount(row.get(4).unwrap_or("")).with_context(|| {
                format!("{}: line {} has an unreadable amount", file_path.display(), line)
            })?;

            records.push(Record {
                date,
                category: row.get(1).unwrap_or("").to_string(),
                payment_method: row.get(2).unwrap_or("").to_string(),
                detail: row.get(3).unwrap_or("").to_string(),
                amount,
            });
        }

        Ok(records)
    }

    /// Replace the store file with `records`, writing a temp file first and
    /// renaming it over the original. The temp file never outlives a failure.
    fn write_records(&self, kind: RecordKind, file_path: &Path, records: &[Record]) -> Result<()> {
        let temp_path = file_path.with_extension("csv.tmp");

        let result = write_temp_file(kind, &temp_path, records).and_then(|()| {
            fs::rename(&temp_path, file_path)
                .with_context(|| format!("Failed to replace {}", file_path.display()))
        });

        if result.is_err() && temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!("Failed to remove {}: {}", temp_path.display(), e);
            }
        }

        result
    }
}

fn write_temp_file(kind: RecordKind, temp_path: &Path, records: &[Record]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .with_context(|| format!("Failed to create {}", temp_path.display()))?;

    let mut csv_writer = Writer::from_writer(BufWriter::new(file));
    csv_writer.write_record(header_row(kind))?;

    for record in records {
        csv_writer.write_record([
            record.formatted_date().as_str(),
            record.category.as_str(),
            record.payment_method.as_str(),
            record.detail.as_str(),
            record.amount.to_string().as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    Ok(())
}

#[async_trait]
impl RecordStorage for CsvRecordRepository {
    async fn load_records(&self, kind: RecordKind, year: i32) -> Result<Option<Vec<Record>>> {
        let file_path = self.connection.store_file_path(kind, year);
        if !file_path.exists() {
            debug!("No {} store at {}", kind, file_path.display());
            return Ok(None);
        }
        self.read_records(kind, &file_path).map(Some)
    }

    async fn append_record(&self, kind: RecordKind, year: i32, record: &Record) -> Result<usize> {
        let _guard = self.connection.writer_lock(kind).lock().await;

        let file_path = self.connection.store_file_path(kind, year);
        let mut records = if file_path.exists() {
            self.read_records(kind, &file_path)?
        } else {
            info!("Creating {} store {}", kind, file_path.display());
            Vec::new()
        };

        records.push(record.clone());
        self.write_records(kind, &file_path, &records)?;

        Ok(records.len())
    }
}

/// Parse a stored date cell. Besides `YYYY-MM-DD`, accepts a date with a
/// time component, keeping only the calendar date.
fn parse_stored_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(date_time.date());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.date_naive());
    }

    Err(anyhow!("'{}' is not a date", value))
}

/// Parse a stored amount cell; an empty cell counts as zero
fn parse_stored_amount(value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    let amount = value
        .parse::<f64>()
        .map_err(|e| anyhow!("'{}' is not a number: {}", value, e))?;
    if !amount.is_finite() {
        return Err(anyhow!("'{}' is not a finite number", value));
    }
    Ok(amount)
}
