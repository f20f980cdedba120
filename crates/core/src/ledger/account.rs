//! Account ledger: account identity, uniqueness and lookup.

use std::sync::Arc;

use tallybook_shared::types::AccountId;

use super::error::LedgerError;
use super::repository::{AccountRepository, RepositoryError};
use super::types::Account;

/// Parses a caller-supplied account identifier.
///
/// # Errors
///
/// Returns [`LedgerError::MissingField`] when the value is absent or blank,
/// and [`LedgerError::InvalidAccountId`] when it is not a positive integer.
pub fn parse_account_id(raw: Option<&str>) -> Result<AccountId, LedgerError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(LedgerError::MissingField("accountId"))?;

    match raw.parse::<AccountId>() {
        Ok(id) if id.is_positive() => Ok(id),
        _ => Err(LedgerError::InvalidAccountId(raw.to_string())),
    }
}

/// Account ledger service.
pub struct AccountLedger<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> Clone for AccountLedger<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: AccountRepository> AccountLedger<R> {
    /// Create a new account ledger.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Registers a new account.
    ///
    /// The lookup before the insert only exists to answer the common case
    /// cheaply. The store's unique constraint decides races, and its
    /// rejection is reported as the same conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document number is empty
    /// - An account with the same document number exists
    /// - The store fails
    pub async fn create(&self, document_number: &str) -> Result<Account, LedgerError> {
        if document_number.trim().is_empty() {
            return Err(LedgerError::MissingField("document_number"));
        }

        if self
            .repo
            .find_account_by_document(document_number)
            .await?
            .is_some()
        {
            return Err(LedgerError::DuplicateDocument(document_number.to_string()));
        }

        match self.repo.create_account(document_number).await {
            Ok(account) => Ok(account),
            Err(RepositoryError::UniqueViolation(_)) => {
                Err(LedgerError::DuplicateDocument(document_number.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not positive, the account does not
    /// exist, or the store fails.
    pub async fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        if !id.is_positive() {
            return Err(LedgerError::InvalidAccountId(id.to_string()));
        }

        self.repo
            .find_account(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))
    }
}
