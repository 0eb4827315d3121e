use shared::{
    AddRecordResponse, Record as SharedRecord, RecordKind, SearchRecordsResponse,
    VocabularyResponse,
};

use crate::domain::{
    commands::records::{AddRecordResult, SearchRecordsResult},
    models::{record::Record as DomainRecord, vocabulary::Vocabulary},
};

pub struct RecordMapper;

impl RecordMapper {
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            date: domain.formatted_date(),
            category: domain.category,
            payment_method: domain.payment_method,
            detail: domain.detail,
            amount: domain.amount,
        }
    }

    pub fn to_add_response(kind: RecordKind, result: AddRecordResult) -> AddRecordResponse {
        let success_message = format!(
            "{} of {:.2} added",
            Self::kind_label(kind),
            result.record.amount
        );
        AddRecordResponse {
            kind,
            record: Self::to_dto(result.record),
            record_count: result.record_count,
            success_message,
        }
    }

    pub fn to_search_response(result: SearchRecordsResult) -> SearchRecordsResponse {
        let message = if result.store_found {
            None
        } else {
            Some(Self::no_records_message(result.kind))
        };

        SearchRecordsResponse {
            kind: result.kind,
            records: result.records.into_iter().map(Self::to_dto).collect(),
            total: result.total,
            store_found: result.store_found,
            message,
        }
    }

    pub fn to_vocabulary_response(vocabulary: &Vocabulary) -> VocabularyResponse {
        VocabularyResponse {
            expense_categories: vocabulary.expense_categories.clone(),
            funding_categories: vocabulary.funding_categories.clone(),
            payment_methods: vocabulary.payment_methods.clone(),
        }
    }

    pub fn no_records_message(kind: RecordKind) -> String {
        format!("No {} records found.", kind.as_str())
    }

    fn kind_label(kind: RecordKind) -> &'static str {
        match kind {
            RecordKind::Expense => "Expense",
            RecordKind::Funding => "Funding",
        }
    }
}
