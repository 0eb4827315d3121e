//! Request-boundary validation for the add and search forms.
//!
//! Form values arrive as optional strings. This module turns them into domain
//! commands and queries: amounts and dates are parsed here, and vocabulary
//! membership is checked only when enforcement is switched on. The store
//! itself accepts any strings.

use chrono::NaiveDate;
use shared::{AddRecordRequest, RecordKind, SearchRecordsRequest};

use crate::domain::commands::records::{AddRecordCommand, SearchRecordsQuery};
use crate::domain::models::{
    record::{RecordValidationError, DATE_FORMAT},
    vocabulary::{Vocabulary, ALL_SENTINEL},
};

#[derive(Debug, Clone)]
pub struct RecordFormValidator {
    vocabulary: Vocabulary,
    enforce_vocabulary: bool,
}

impl Default for RecordFormValidator {
    fn default() -> Self {
        Self::new(Vocabulary::default(), false)
    }
}

impl RecordFormValidator {
    pub fn new(vocabulary: Vocabulary, enforce_vocabulary: bool) -> Self {
        Self {
            vocabulary,
            enforce_vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn validate_add_request(
        &self,
        kind: RecordKind,
        request: AddRecordRequest,
    ) -> Result<AddRecordCommand, RecordValidationError> {
        let amount = parse_amount(request.amount.as_deref())?;
        let category = request.category.unwrap_or_default();
        let payment_method = request.payment_method.unwrap_or_default();

        if self.enforce_vocabulary {
            if !self.vocabulary.has_category(kind, &category) {
                return Err(RecordValidationError::UnknownCategory { kind, category });
            }
            if !self.vocabulary.has_payment_method(&payment_method) {
                return Err(RecordValidationError::UnknownPaymentMethod(payment_method));
            }
        }

        Ok(AddRecordCommand {
            kind,
            category,
            payment_method,
            detail: request.detail.unwrap_or_default(),
            amount,
        })
    }

    pub fn validate_search_request(
        &self,
        kind: RecordKind,
        request: SearchRecordsRequest,
    ) -> Result<SearchRecordsQuery, RecordValidationError> {
        let date = parse_search_date(request.search_date.as_deref())?;
        let category = non_blank(request.search_category);
        let payment_method = non_blank(request.search_payment_method);

        if self.enforce_vocabulary {
            if let Some(category) = category.as_deref().filter(|c| *c != ALL_SENTINEL) {
                if !self.vocabulary.has_category(kind, category) {
                    return Err(RecordValidationError::UnknownCategory {
                        kind,
                        category: category.to_string(),
                    });
                }
            }
            if let Some(method) = payment_method.as_deref().filter(|m| *m != ALL_SENTINEL) {
                if !self.vocabulary.has_payment_method(method) {
                    return Err(RecordValidationError::UnknownPaymentMethod(method.to_string()));
                }
            }
        }

        Ok(SearchRecordsQuery {
            kind,
            date,
            category,
            payment_method,
        })
    }
}

/// Absent or blank amounts count as zero; anything else must be a finite number
pub fn parse_amount(input: Option<&str>) -> Result<f64, RecordValidationError> {
    let Some(raw) = input.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(0.0);
    };

    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(RecordValidationError::InvalidAmount(raw.to_string())),
    }
}

/// Absent or blank dates mean no date filter
pub fn parse_search_date(input: Option<&str>) -> Result<Option<NaiveDate>, RecordValidationError> {
    let Some(raw) = input.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| RecordValidationError::InvalidDate(raw.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
