//! # Domain Module
//!
//! Business logic for the expense and funding ledgers, independent of HTTP
//! and of the file format.
//!
//! - **record_service**: the append and search/filter pipelines
//! - **record_form**: turns raw form values into commands and queries
//! - **clock**: where "today" comes from
//! - **commands**: internal command/query/result types
//! - **models**: records, validation errors and vocabularies
//!
//! Expense and funding records follow the same rules; `RecordKind` selects
//! the store and the category vocabulary.

pub mod clock;
pub mod commands;
pub mod models;
pub mod record_form;
pub mod record_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use record_form::RecordFormValidator;
pub use record_service::{RecordService, RecordServiceError};
