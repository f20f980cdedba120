//! Single-entry ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Account ledger (document number uniqueness, lookup)
//! - Operation type catalog (seeding, lookup)
//! - Transaction recorder (reference validation, sign normalization)
//! - Repository traits implemented by the db crate
//! - Error types for ledger operations

pub mod account;
pub mod catalog;
pub mod error;
pub mod recorder;
pub mod repository;
pub mod types;

#[cfg(test)]
mod mock;

pub use account::{AccountLedger, parse_account_id};
pub use catalog::OperationCatalog;
pub use error::LedgerError;
pub use recorder::TransactionRecorder;
pub use repository::{
    AccountRepository, OperationTypeRepository, RepositoryError, TransactionRepository,
};
pub use types::{
    AMOUNT_SCALE, Account, MAX_AMOUNT, NewTransaction, OperationTypeRecord, PostTransactionInput,
    PostingRequest, SeedReport, Transaction,
};
