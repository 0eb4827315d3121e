//! Domain model for a ledger record.
use chrono::NaiveDate;
use shared::RecordKind;

/// Date format used on disk and at the request boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub category: String,
    pub payment_method: String,
    pub detail: String,
    pub amount: f64,
}

impl Record {
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Trimmed exact comparison against the stored category
    pub fn has_category(&self, category: &str) -> bool {
        self.category.trim() == category.trim()
    }

    /// Trimmed exact comparison against the stored payment method
    pub fn has_payment_method(&self, payment_method: &str) -> bool {
        self.payment_method.trim() == payment_method.trim()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordValidationError {
    #[error("Amount '{0}' is not a valid number")]
    InvalidAmount(String),
    #[error("Date '{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown {kind} type '{category}'")]
    UnknownCategory { kind: RecordKind, category: String },
    #[error("Unknown payment method '{0}'")]
    UnknownPaymentMethod(String),
}
