//! # Expense Ledger Backend
//!
//! Records expenses and funding entries into one CSV file per kind and year,
//! and serves add / search endpoints over HTTP.
//!
//! ```text
//! IO Layer (REST handlers, mappers)
//!     ↓
//! Domain Layer (record service, form validation)
//!     ↓
//! Storage Layer (yearly CSV stores)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod lifecycle;
pub mod storage;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{Clock, RecordFormValidator, RecordService, SystemClock};
use crate::lifecycle::ShutdownSignal;
use crate::storage::CsvConnection;

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService<CsvConnection>,
    pub record_form_validator: RecordFormValidator,
    pub shutdown: ShutdownSignal,
}

/// Wire the services on top of an existing connection and clock
pub fn build_state(
    connection: CsvConnection,
    clock: Arc<dyn Clock>,
    record_form_validator: RecordFormValidator,
) -> AppState {
    AppState {
        record_service: RecordService::new(Arc::new(connection), clock),
        record_form_validator,
        shutdown: ShutdownSignal::new(),
    }
}

/// Initialize the backend from configuration
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let connection = match config.data_dir() {
        Some(dir) => CsvConnection::new(dir)?,
        None => CsvConnection::new_default()?,
    };
    info!("Records are stored in {}", connection.base_directory().display());

    info!("Setting up domain model");
    let validator = RecordFormValidator::new(
        config.vocabulary.lists.clone(),
        config.vocabulary.enforce,
    );

    Ok(build_state(connection, Arc::new(SystemClock), validator))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/vocabulary", get(io::get_vocabulary))
        .route("/expenses", post(io::add_expense))
        .route(
            "/expenses/search",
            get(io::search_expenses_by_query).post(io::search_expenses),
        )
        .route("/funding", post(io::add_funding))
        .route(
            "/funding/search",
            get(io::search_funding_by_query).post(io::search_funding),
        )
        .route("/shutdown", post(io::shutdown))
        .route("/health", get(io::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use crate::storage::csv::test_utils::{test_today, TestEnvironment};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use shared::{AddRecordResponse, SearchRecordsResponse, ShutdownResponse, VocabularyResponse};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router(env: &TestEnvironment) -> (Router, AppState) {
        let state = build_state(
            env.connection.clone(),
            Arc::new(FixedClock(test_today())),
            RecordFormValidator::default(),
        );
        (create_router(state.clone()), state)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send<T: serde::de::DeserializeOwned>(
        router: &Router,
        request: Request<Body>,
    ) -> (StatusCode, Option<T>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_add_then_search_expense() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        let (status, added) = send::<AddRecordResponse>(
            &router,
            form_post(
                "/api/expenses",
                "expense_type=Food+%26+Refreshments&payment_method=Cashbook&detail=lunch&amount=12.50",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let added = added.unwrap();
        assert_eq!(added.record.date, "2026-10-16");
        assert_eq!(added.record.category, "Food & Refreshments");
        assert_eq!(added.record_count, 1);

        let (status, found) =
            send::<SearchRecordsResponse>(&router, form_post("/api/expenses/search", "")).await;
        assert_eq!(status, StatusCode::OK);
        let found = found.unwrap();
        assert!(found.store_found);
        assert_eq!(found.records, vec![added.record]);
        assert_eq!(found.total, 12.5);
    }

    #[tokio::test]
    async fn test_search_funding_by_payment_method() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        for body in [
            "funding_type=Sponsorship&payment_method=Cashbook&detail=a&amount=100",
            "funding_type=Sponsorship&payment_method=Cheque&detail=b&amount=250.25",
        ] {
            let (status, _) = send::<AddRecordResponse>(&router, form_post("/api/funding", body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, found) = send::<SearchRecordsResponse>(
            &router,
            form_post(
                "/api/funding/search",
                "search_date=&search_funding_type=All&search_payment_method=Cheque",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found = found.unwrap();
        assert_eq!(found.records.len(), 1);
        assert_eq!(found.records[0].detail, "b");
        assert_eq!(found.total, 250.25);
    }

    #[tokio::test]
    async fn test_search_missing_store_and_empty_match() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        let (_, missing) =
            send::<SearchRecordsResponse>(&router, get_request("/api/expenses/search")).await;
        let missing = missing.unwrap();
        assert!(!missing.store_found);
        assert_eq!(missing.message.as_deref(), Some("No expense records found."));

        send::<AddRecordResponse>(
            &router,
            form_post("/api/expenses", "expense_type=General+Expense&payment_method=Cheque&amount=3"),
        )
        .await;

        let (status, empty) = send::<SearchRecordsResponse>(
            &router,
            get_request("/api/expenses/search?search_date=2026-01-01"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let empty = empty.unwrap();
        assert!(empty.store_found);
        assert!(empty.records.is_empty());
        assert_eq!(empty.total, 0.0);
        assert_eq!(empty.message, None);
    }

    #[tokio::test]
    async fn test_blank_amount_defaults_to_zero_and_bad_amount_is_rejected() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        let (status, added) = send::<AddRecordResponse>(
            &router,
            form_post("/api/expenses", "expense_type=General+Expense&amount="),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(added.unwrap().record.amount, 0.0);

        let (status, error) = send::<shared::ErrorResponse>(
            &router,
            form_post("/api/expenses", "expense_type=General+Expense&amount=abc"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.unwrap().error.contains("abc"));

        let (_, found) =
            send::<SearchRecordsResponse>(&router, get_request("/api/expenses/search")).await;
        assert_eq!(found.unwrap().records.len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_form_and_query_get_json_errors() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        // the same field under both of its names
        let (status, error) = send::<shared::ErrorResponse>(
            &router,
            form_post("/api/expenses", "category=A&expense_type=B&amount=1"),
        )
        .await;
        assert!(status.is_client_error());
        assert!(!error.unwrap().error.is_empty());
        assert!(!env.base_directory().join("expense-2026.csv").exists());

        let (status, error) = send::<shared::ErrorResponse>(
            &router,
            get_request("/api/funding/search?search_category=A&search_funding_type=B"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.is_some());
    }

    #[tokio::test]
    async fn test_vocabulary_endpoint() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);

        let (status, vocabulary) =
            send::<VocabularyResponse>(&router, get_request("/api/vocabulary")).await;
        assert_eq!(status, StatusCode::OK);
        let vocabulary = vocabulary.unwrap();
        assert_eq!(vocabulary.expense_categories.len(), 9);
        assert_eq!(vocabulary.funding_categories.len(), 6);
        assert_eq!(vocabulary.payment_methods, vec!["Cashbook", "Cheque"]);
    }

    #[tokio::test]
    async fn test_shutdown_endpoint_triggers_signal() {
        let env = TestEnvironment::new().unwrap();
        let (router, state) = test_router(&env);

        let (status, response) =
            send::<ShutdownResponse>(&router, form_post("/api/shutdown", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.is_some());

        tokio::time::timeout(Duration::from_secs(5), state.shutdown.wait())
            .await
            .expect("shutdown signal fires");
    }

    #[tokio::test]
    async fn test_health() {
        let env = TestEnvironment::new().unwrap();
        let (router, _state) = test_router(&env);
        let response = router.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
