//! Transaction recorder: validates references and appends signed transactions.

use std::sync::Arc;

use chrono::Utc;

use super::account::AccountLedger;
use super::catalog::OperationCatalog;
use super::error::LedgerError;
use super::repository::{AccountRepository, OperationTypeRepository, TransactionRepository};
use super::types::{NewTransaction, PostTransactionInput, Transaction};
use crate::operation::OperationType;

/// Transaction recorder service.
pub struct TransactionRecorder<A, O, T>
where
    A: AccountRepository,
    O: OperationTypeRepository,
    T: TransactionRepository,
{
    accounts: AccountLedger<A>,
    catalog: OperationCatalog<O>,
    transactions: Arc<T>,
}

impl<A, O, T> TransactionRecorder<A, O, T>
where
    A: AccountRepository,
    O: OperationTypeRepository,
    T: TransactionRepository,
{
    /// Create a new transaction recorder.
    #[must_use]
    pub fn new(accounts: AccountLedger<A>, catalog: OperationCatalog<O>, transactions: Arc<T>) -> Self {
        Self {
            accounts,
            catalog,
            transactions,
        }
    }

    /// Validates and appends a transaction.
    ///
    /// Steps, each a precondition for the next:
    /// 1. All fields present, amount non-zero
    /// 2. Account exists
    /// 3. Operation type exists in the catalog
    /// 4. Amount normalized to the operation type's sign
    /// 5. Row appended with the current UTC time
    ///
    /// Nothing is written unless every check passes. Posting is not
    /// idempotent: submitting the same request twice records two rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or unknown references,
    /// and a storage error if the store fails.
    pub async fn post(&self, input: PostTransactionInput) -> Result<Transaction, LedgerError> {
        let request = input.require()?;

        match self.accounts.get(request.account_id).await {
            Ok(_) => {}
            Err(LedgerError::AccountNotFound(id)) => return Err(LedgerError::UnknownAccount(id)),
            Err(e) => return Err(e),
        }

        // A catalog row with no matching variant has no sign rule.
        let operation = self
            .catalog
            .lookup(request.operation_type_id)
            .await?
            .and_then(|record| OperationType::from_id(record.id))
            .ok_or(LedgerError::UnknownOperationType(request.operation_type_id))?;

        let transaction = NewTransaction {
            account_id: request.account_id,
            operation_type_id: operation.id(),
            amount: operation.normalize(request.amount),
            event_date: Utc::now(),
        };

        Ok(self.transactions.create_transaction(transaction).await?)
    }
}
