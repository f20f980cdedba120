//! Transaction repository for the append-only ledger.
//!
//! Only inserts are exposed; ledger rows are never updated or deleted.

use sea_orm::{ActiveModelTrait, DatabaseConnection, NotSet, Set};
use tallybook_core::ledger::{
    NewTransaction, RepositoryError, Transaction, TransactionRepository as TransactionRepoTrait,
};
use tallybook_shared::types::{AccountId, OperationTypeId, TransactionId};
use tracing::debug;

use super::map_db_err;
use crate::entities::transactions;

/// Transaction repository implementation.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Create a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TransactionRepoTrait for TransactionRepository {
    async fn create_transaction(&self, input: NewTransaction) -> Result<Transaction, RepositoryError> {
        let active_model = transactions::ActiveModel {
            id: NotSet,
            account_id: Set(input.account_id.into_inner()),
            operation_type_id: Set(input.operation_type_id.into_inner()),
            amount: Set(input.amount),
            event_date: Set(input.event_date),
        };

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;
        debug!(transaction_id = model.id, account_id = model.account_id, "transaction appended");

        Ok(to_domain(model))
    }
}

fn to_domain(model: transactions::Model) -> Transaction {
    Transaction {
        id: TransactionId::new(model.id),
        account_id: AccountId::new(model.account_id),
        operation_type_id: OperationTypeId::new(model.operation_type_id),
        amount: model.amount,
        event_date: model.event_date,
    }
}
