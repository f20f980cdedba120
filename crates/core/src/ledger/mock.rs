//! In-memory repository used by the ledger service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tallybook_shared::types::{AccountId, OperationTypeId, TransactionId};

use super::repository::{
    AccountRepository, OperationTypeRepository, RepositoryError, TransactionRepository,
};
use super::types::{Account, NewTransaction, OperationTypeRecord, Transaction};
use crate::operation::OperationType;

/// Mock repository backed by mutex-guarded collections.
///
/// Enforces the same uniqueness rules as the real schema.
#[derive(Default)]
pub(crate) struct MockLedgerRepository {
    accounts: Mutex<Vec<Account>>,
    operation_types: Mutex<BTreeMap<i32, OperationTypeRecord>>,
    transactions: Mutex<Vec<Transaction>>,
    /// Makes document lookups miss, as if a concurrent insert had not committed yet.
    pub(crate) hide_documents: AtomicBool,
    /// Makes every write fail with a backend error.
    pub(crate) fail_writes: AtomicBool,
}

impl MockLedgerRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A repository with the canonical operation types already present.
    pub(crate) fn seeded() -> Self {
        let repo = Self::new();
        {
            let mut ops = repo.operation_types.lock().unwrap();
            for op in OperationType::ALL {
                ops.insert(op.id().into_inner(), op.into());
            }
        }
        repo
    }

    pub(crate) fn insert_raw_operation_type(&self, id: i32, description: &str) {
        self.operation_types.lock().unwrap().insert(
            id,
            OperationTypeRecord {
                id: OperationTypeId::new(id),
                description: description.to_string(),
            },
        );
    }

    pub(crate) fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    pub(crate) fn operation_types(&self) -> Vec<OperationTypeRecord> {
        self.operation_types.lock().unwrap().values().cloned().collect()
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

impl AccountRepository for MockLedgerRepository {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_account_by_document(
        &self,
        document_number: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        if self.hide_documents.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.document_number == document_number)
            .cloned())
    }

    async fn create_account(&self, document_number: &str) -> Result<Account, RepositoryError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.document_number == document_number) {
            return Err(RepositoryError::UniqueViolation(
                "accounts_document_number_key".to_string(),
            ));
        }
        let next_id = i64::try_from(accounts.len()).unwrap() + 1;
        let account = Account {
            id: AccountId::new(next_id),
            document_number: document_number.to_string(),
        };
        accounts.push(account.clone());
        Ok(account)
    }
}

impl OperationTypeRepository for MockLedgerRepository {
    async fn find_operation_type(
        &self,
        id: OperationTypeId,
    ) -> Result<Option<OperationTypeRecord>, RepositoryError> {
        Ok(self
            .operation_types
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .cloned())
    }

    async fn create_operation_type(&self, record: &OperationTypeRecord) -> Result<(), RepositoryError> {
        self.check_writable()?;
        let mut ops = self.operation_types.lock().unwrap();
        if ops.contains_key(&record.id.into_inner()) {
            return Err(RepositoryError::UniqueViolation(
                "operation_types_pkey".to_string(),
            ));
        }
        ops.insert(record.id.into_inner(), record.clone());
        Ok(())
    }

    async fn list_operation_types(&self) -> Result<Vec<OperationTypeRecord>, RepositoryError> {
        Ok(self.operation_types())
    }
}

impl TransactionRepository for MockLedgerRepository {
    async fn create_transaction(&self, input: NewTransaction) -> Result<Transaction, RepositoryError> {
        self.check_writable()?;
        let mut transactions = self.transactions.lock().unwrap();
        let next_id = i64::try_from(transactions.len()).unwrap() + 1;
        let transaction = Transaction {
            id: TransactionId::new(next_id),
            account_id: input.account_id,
            operation_type_id: input.operation_type_id,
            amount: input.amount,
            event_date: input.event_date,
        };
        transactions.push(transaction.clone());
        Ok(transaction)
    }
}
