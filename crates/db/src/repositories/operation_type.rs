//! Operation type repository for the reference table.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tallybook_core::ledger::{
    OperationTypeRecord, OperationTypeRepository as OperationTypeRepoTrait, RepositoryError,
};
use tallybook_shared::types::OperationTypeId;

use super::map_db_err;
use crate::entities::operation_types;

/// Operation type repository implementation.
#[derive(Debug, Clone)]
pub struct OperationTypeRepository {
    db: DatabaseConnection,
}

impl OperationTypeRepository {
    /// Create a new operation type repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl OperationTypeRepoTrait for OperationTypeRepository {
    async fn find_operation_type(
        &self,
        id: OperationTypeId,
    ) -> Result<Option<OperationTypeRecord>, RepositoryError> {
        let model = operation_types::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(to_domain))
    }

    async fn create_operation_type(
        &self,
        record: &OperationTypeRecord,
    ) -> Result<(), RepositoryError> {
        let active_model = operation_types::ActiveModel {
            id: Set(record.id.into_inner()),
            description: Set(record.description.clone()),
        };

        active_model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn list_operation_types(&self) -> Result<Vec<OperationTypeRecord>, RepositoryError> {
        let models = operation_types::Entity::find()
            .order_by_asc(operation_types::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

fn to_domain(model: operation_types::Model) -> OperationTypeRecord {
    OperationTypeRecord {
        id: OperationTypeId::new(model.id),
        description: model.description,
    }
}
