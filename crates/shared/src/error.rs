//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Domain errors carry a more specific machine-readable `code`, which is
/// reported to clients instead of the generic category code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// Validation error (missing or malformed input, unknown reference).
    #[error("Validation error: {message}")]
    Validation {
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {message}")]
    Conflict {
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Creates a validation error with the generic `VALIDATION_ERROR` code.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Conflict { .. } => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { code, .. }
            | Self::Validation { code, .. }
            | Self::Conflict { code, .. } => code,
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the message that is safe to show to API clients.
    ///
    /// Server-side failures never leak their details.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Conflict { message, .. } => message.clone(),
            Self::Database(_) => "An error occurred".to_string(),
        }
    }

    /// Returns true if this is a server-side failure.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
