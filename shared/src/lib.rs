use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ledger a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Money spent (expense-<year> store)
    Expense,
    /// Money received (funding-<year> store)
    Funding,
}

impl RecordKind {
    /// Lowercase name used in file names and routes
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Funding => "funding",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger row as returned over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Expense type or funding type
    pub category: String,
    /// Cashbook, Cheque, or whatever was submitted
    pub payment_method: String,
    /// Free-text details
    pub detail: String,
    pub amount: f64,
}

/// Form payload for adding a record.
///
/// Every field is optional because HTML forms may omit any of them; the
/// category is accepted under either form field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddRecordRequest {
    #[serde(default, alias = "expense_type", alias = "funding_type")]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    /// Raw amount text, parsed by the backend
    #[serde(default)]
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRecordResponse {
    pub kind: RecordKind,
    pub record: Record,
    /// Number of rows in the store after the append
    pub record_count: usize,
    pub success_message: String,
}

/// Form payload for searching a store. Blank or "All" means no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecordsRequest {
    /// Exact date filter (YYYY-MM-DD)
    #[serde(default)]
    pub search_date: Option<String>,
    #[serde(default, alias = "search_expense", alias = "search_funding_type")]
    pub search_category: Option<String>,
    #[serde(default)]
    pub search_payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecordsResponse {
    pub kind: RecordKind,
    /// Matching rows in insertion order
    pub records: Vec<Record>,
    /// Sum of `amount` over `records`
    pub total: f64,
    /// False when no store file exists yet for the current year
    pub store_found: bool,
    /// Informational message, set only when the store is missing
    pub message: Option<String>,
}

/// Fixed choice lists for building the add/search forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub expense_categories: Vec<String>,
    pub funding_categories: Vec<String>,
    pub payment_methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutdownResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_accepts_kind_specific_field_names() {
        let expense: AddRecordRequest = serde_json::from_str(
            r#"{"expense_type": "Transport & Fuel", "payment_method": "Cheque", "amount": "40"}"#,
        )
        .unwrap();
        assert_eq!(expense.category.as_deref(), Some("Transport & Fuel"));
        assert_eq!(expense.detail, None);

        let funding: AddRecordRequest =
            serde_json::from_str(r#"{"funding_type": "Scholarship"}"#).unwrap();
        assert_eq!(funding.category.as_deref(), Some("Scholarship"));
        assert_eq!(funding.amount, None);
    }

    #[test]
    fn test_search_request_accepts_kind_specific_field_names() {
        let request: SearchRecordsRequest =
            serde_json::from_str(r#"{"search_funding_type": "All", "search_date": ""}"#).unwrap();
        assert_eq!(request.search_category.as_deref(), Some("All"));
        assert_eq!(request.search_date.as_deref(), Some(""));
        assert_eq!(request.search_payment_method, None);
    }

    #[test]
    fn test_record_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RecordKind::Funding).unwrap(), "\"funding\"");
        assert_eq!(RecordKind::Expense.to_string(), "expense");
    }
}
