//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for accounts and transactions
//! - JSON error rendering
//! - OpenAPI document and Swagger UI page
//! - Request and response types

pub mod error;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tallybook_core::ledger::{AccountLedger, OperationCatalog, TransactionRecorder};
use tallybook_db::{AccountRepository, OperationTypeRepository, TransactionRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Transaction recorder backed by the `SeaORM` repositories.
pub type Recorder =
    TransactionRecorder<AccountRepository, OperationTypeRepository, TransactionRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    /// Wraps a connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Account ledger over this state's pool.
    #[must_use]
    pub fn accounts(&self) -> AccountLedger<AccountRepository> {
        AccountLedger::new(Arc::new(AccountRepository::new((*self.db).clone())))
    }

    /// Operation type catalog over this state's pool.
    #[must_use]
    pub fn catalog(&self) -> OperationCatalog<OperationTypeRepository> {
        OperationCatalog::new(Arc::new(OperationTypeRepository::new((*self.db).clone())))
    }

    /// Transaction recorder over this state's pool.
    #[must_use]
    pub fn recorder(&self) -> Recorder {
        TransactionRecorder::new(
            self.accounts(),
            self.catalog(),
            Arc::new(TransactionRepository::new((*self.db).clone())),
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use sea_orm::Database;
    use serde_json::Value;
    use tallybook_db::migration::{Migrator, MigratorTrait};
    use tower::ServiceExt;

    use super::{AppState, create_router};

    /// Migrated and seeded state over an in-memory `SQLite` database.
    pub(crate) async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let state = AppState::new(db);
        state.catalog().seed().await.expect("Failed to seed catalog");
        state
    }

    /// Sends one request through a fresh router and decodes the JSON body.
    pub(crate) async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header("Content-Type", "application/json");
        }
        let request = request
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Sends a GET request and returns the raw body text.
    pub(crate) async fn get_text(state: &AppState, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
