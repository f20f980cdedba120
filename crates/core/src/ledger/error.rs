//! Ledger error types for validation, lookup and storage failures.

use rust_decimal::Decimal;
use tallybook_shared::AppError;
use tallybook_shared::types::{AccountId, OperationTypeId};
use thiserror::Error;

use super::repository::RepositoryError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A required request field is absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An account identifier is not a positive integer.
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    /// Transaction amount does not fit the ledger's amount column.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(Decimal),

    /// A transaction references an account that does not exist.
    #[error("account not found: {0}")]
    UnknownAccount(AccountId),

    /// A transaction references an operation type outside the catalog.
    #[error("operation type not found: {0}")]
    UnknownOperationType(OperationTypeId),

    // ========== Lookup Errors ==========
    /// Requested account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    // ========== Conflict Errors ==========
    /// An account with this document number already exists.
    #[error("account with document number '{0}' already exists")]
    DuplicateDocument(String),

    // ========== Storage Errors ==========
    /// The store failed after validation passed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidAccountId(_) => "INVALID_ACCOUNT_ID",
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::UnknownAccount(_) => "ACCOUNT_NOT_FOUND",
            Self::UnknownOperationType(_) => "OPERATION_TYPE_NOT_FOUND",
            Self::AccountNotFound(_) => "NOT_FOUND",
            Self::DuplicateDocument(_) => "DUPLICATE_DOCUMENT",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// A missing account is a 404 when it is the thing being fetched, but a
    /// 400 when it is a reference inside a transaction request.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::MissingField(_)
            | Self::InvalidAccountId(_)
            | Self::AmountOutOfRange(_)
            | Self::UnknownAccount(_)
            | Self::UnknownOperationType(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 409 Conflict
            Self::DuplicateDocument(_) => 409,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }

    /// Returns true if the request can be fixed by the caller.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.http_status_code() < 500
    }
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let code = err.error_code();
        match err.http_status_code() {
            404 => Self::NotFound {
                code,
                message: err.to_string(),
            },
            409 => Self::Conflict {
                code,
                message: err.to_string(),
            },
            500 => Self::Database(err.to_string()),
            _ => Self::Validation {
                code,
                message: err.to_string(),
            },
        }
    }
}
