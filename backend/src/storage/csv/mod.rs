//! CSV file storage: one `<kind>-<year>.csv` file per store under a data directory.

pub mod connection;
pub mod record_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use record_repository::CsvRecordRepository;
