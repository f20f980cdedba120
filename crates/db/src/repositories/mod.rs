//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod operation_type;
pub mod transaction;

pub use account::AccountRepository;
pub use operation_type::OperationTypeRepository;
pub use transaction::TransactionRepository;

use sea_orm::{DbErr, SqlErr};
use tallybook_core::ledger::RepositoryError;

/// Translates a database error, keeping uniqueness violations distinguishable.
pub(crate) fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::UniqueViolation(detail),
        _ => RepositoryError::Backend(err.to_string()),
    }
}
