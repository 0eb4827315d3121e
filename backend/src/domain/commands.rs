//! Domain-level command and query types.
//! These are not exposed over the API; the REST layer maps the `shared` DTOs
//! onto them after validation.

pub mod records {
    use chrono::NaiveDate;
    use shared::RecordKind;

    use crate::domain::models::record::Record;

    /// Input for appending a record. The date is stamped by the service.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AddRecordCommand {
        pub kind: RecordKind,
        pub category: String,
        pub payment_method: String,
        pub detail: String,
        pub amount: f64,
    }

    /// Search predicates. `None`, blank and "All" all mean "no filter".
    #[derive(Debug, Clone, PartialEq)]
    pub struct SearchRecordsQuery {
        pub kind: RecordKind,
        pub date: Option<NaiveDate>,
        pub category: Option<String>,
        pub payment_method: Option<String>,
    }

    impl SearchRecordsQuery {
        pub fn unfiltered(kind: RecordKind) -> Self {
            Self {
                kind,
                date: None,
                category: None,
                payment_method: None,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct AddRecordResult {
        pub record: Record,
        pub record_count: usize,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct SearchRecordsResult {
        pub kind: RecordKind,
        pub records: Vec<Record>,
        pub total: f64,
        /// False when the store for the current year does not exist
        pub store_found: bool,
    }
}
