//! JSON error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tallybook_core::ledger::LedgerError;
use tallybook_shared::AppError;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    #[schema(value_type = String, example = "MISSING_FIELD")]
    pub error: &'static str,
    /// Human-readable message.
    #[schema(example = "amount is required")]
    pub message: String,
}

/// An error rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    fn from_app_error(err: &AppError, code: &'static str) -> Self {
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message: err.public_message(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self::from_app_error(&err, err.error_code())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        // The ledger's code replaces the category code.
        let code = err.error_code();
        match &err {
            LedgerError::Storage(detail) => error!(error = %detail, "Ledger storage failure"),
            LedgerError::DuplicateDocument(document) => {
                warn!(document_number = %document, "Duplicate document number rejected");
            }
            _ => {}
        }
        Self::from_app_error(&AppError::from(err), code)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.code,
                message: self.message,
            }),
        )
            .into_response()
    }
}
