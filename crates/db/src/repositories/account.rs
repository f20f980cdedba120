//! Account repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use tallybook_core::ledger::{Account, AccountRepository as AccountRepoTrait, RepositoryError};
use tallybook_shared::types::AccountId;

use super::map_db_err;
use crate::entities::accounts;

/// Account repository implementation.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AccountRepoTrait for AccountRepository {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(to_domain))
    }

    async fn find_account_by_document(
        &self,
        document_number: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::DocumentNumber.eq(document_number))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(to_domain))
    }

    async fn create_account(&self, document_number: &str) -> Result<Account, RepositoryError> {
        let active_model = accounts::ActiveModel {
            id: NotSet,
            document_number: Set(document_number.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(to_domain(model))
    }
}

fn to_domain(model: accounts::Model) -> Account {
    Account {
        id: AccountId::new(model.id),
        document_number: model.document_number,
    }
}
