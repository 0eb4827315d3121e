//! # REST API for Records
//!
//! Add and search endpoints for the expense and funding ledgers. Both kinds
//! share the same handlers; the route picks the kind.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{AddRecordRequest, ErrorResponse, RecordKind, SearchRecordsRequest};
use tracing::{error, info, warn};

use crate::domain::RecordServiceError;
use crate::io::rest::mappers::record_mapper::RecordMapper;
use crate::AppState;

/// POST /api/expenses
pub async fn add_expense(
    State(state): State<AppState>,
    request: Result<Form<AddRecordRequest>, FormRejection>,
) -> Response {
    match request {
        Ok(Form(request)) => add_record(state, RecordKind::Expense, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

/// POST /api/funding
pub async fn add_funding(
    State(state): State<AppState>,
    request: Result<Form<AddRecordRequest>, FormRejection>,
) -> Response {
    match request {
        Ok(Form(request)) => add_record(state, RecordKind::Funding, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

/// POST /api/expenses/search
pub async fn search_expenses(
    State(state): State<AppState>,
    request: Result<Form<SearchRecordsRequest>, FormRejection>,
) -> Response {
    match request {
        Ok(Form(request)) => search_records(state, RecordKind::Expense, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

/// GET /api/expenses/search
pub async fn search_expenses_by_query(
    State(state): State<AppState>,
    request: Result<Query<SearchRecordsRequest>, QueryRejection>,
) -> Response {
    match request {
        Ok(Query(request)) => search_records(state, RecordKind::Expense, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

/// POST /api/funding/search
pub async fn search_funding(
    State(state): State<AppState>,
    request: Result<Form<SearchRecordsRequest>, FormRejection>,
) -> Response {
    match request {
        Ok(Form(request)) => search_records(state, RecordKind::Funding, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

/// GET /api/funding/search
pub async fn search_funding_by_query(
    State(state): State<AppState>,
    request: Result<Query<SearchRecordsRequest>, QueryRejection>,
) -> Response {
    match request {
        Ok(Query(request)) => search_records(state, RecordKind::Funding, request).await,
        Err(rejection) => rejection_response(rejection.status(), rejection.body_text()),
    }
}

async fn add_record(state: AppState, kind: RecordKind, request: AddRecordRequest) -> Response {
    info!("Add {} record - request: {:?}", kind, request);

    let command = match state.record_form_validator.validate_add_request(kind, request) {
        Ok(command) => command,
        Err(e) => return error_response(e.into()),
    };

    match state.record_service.add_record(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(RecordMapper::to_add_response(kind, result)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn search_records(
    state: AppState,
    kind: RecordKind,
    request: SearchRecordsRequest,
) -> Response {
    info!("Search {} records - request: {:?}", kind, request);

    let query = match state.record_form_validator.validate_search_request(kind, request) {
        Ok(query) => query,
        Err(e) => return error_response(e.into()),
    };

    match state.record_service.search_records(query).await {
        Ok(result) => (StatusCode::OK, Json(RecordMapper::to_search_response(result))).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: RecordServiceError) -> Response {
    let status = match &err {
        RecordServiceError::Validation(e) => {
            warn!("Rejected request: {}", e);
            StatusCode::BAD_REQUEST
        }
        RecordServiceError::Storage(e) => {
            error!("Storage failure: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RecordServiceError::TotalOutOfRange { .. } => {
            error!("{}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

/// Form or query string that could not be decoded at all
fn rejection_response(status: StatusCode, message: String) -> Response {
    warn!("Rejected request body: {}", message);
    (status, Json(ErrorResponse { error: message })).into_response()
}
