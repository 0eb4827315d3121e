//! # Storage Module
//!
//! Persistence for ledger records. Each (record kind, year) pair maps to one
//! CSV file that is read in full and rewritten in full on every append.
//!
//! - **traits**: the `RecordStorage` / `Connection` seam the domain depends on
//! - **csv**: the file-backed implementation

pub mod csv;
pub mod traits;

pub use csv::{CsvConnection, CsvRecordRepository};
pub use traits::{Connection, RecordStorage};
