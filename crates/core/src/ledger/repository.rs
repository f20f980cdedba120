//! Record-access contracts for the ledger.
//!
//! These traits are implemented by the db crate to provide actual database
//! operations. The services in this module only ever read accounts and
//! operation types, and only ever append transactions.

use std::future::Future;

use tallybook_shared::types::{AccountId, OperationTypeId};
use thiserror::Error;

use super::types::{Account, NewTransaction, OperationTypeRecord, Transaction};

/// Failures reported by a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected a write because of a uniqueness constraint.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other store failure.
    #[error("repository error: {0}")]
    Backend(String),
}

/// Repository trait for account persistence.
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID.
    fn find_account(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Find an account by exact document number.
    fn find_account_by_document(
        &self,
        document_number: &str,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Insert a new account.
    ///
    /// Must fail with [`RepositoryError::UniqueViolation`] when the document
    /// number is already taken.
    fn create_account(
        &self,
        document_number: &str,
    ) -> impl Future<Output = Result<Account, RepositoryError>> + Send;
}

/// Repository trait for the operation type reference table.
pub trait OperationTypeRepository: Send + Sync {
    /// Find an operation type by ID.
    fn find_operation_type(
        &self,
        id: OperationTypeId,
    ) -> impl Future<Output = Result<Option<OperationTypeRecord>, RepositoryError>> + Send;

    /// Insert an operation type row.
    ///
    /// Must fail with [`RepositoryError::UniqueViolation`] when the ID exists.
    fn create_operation_type(
        &self,
        record: &OperationTypeRecord,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// List all operation types ordered by ID.
    fn list_operation_types(
        &self,
    ) -> impl Future<Output = Result<Vec<OperationTypeRecord>, RepositoryError>> + Send;
}

/// Repository trait for the append-only transaction ledger.
pub trait TransactionRepository: Send + Sync {
    /// Append a transaction and return it with its assigned ID.
    fn create_transaction(
        &self,
        input: NewTransaction,
    ) -> impl Future<Output = Result<Transaction, RepositoryError>> + Send;
}
