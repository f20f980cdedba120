//! Operation type catalog: reference data seeding and lookup.

use std::sync::Arc;

use tallybook_shared::types::OperationTypeId;

use super::error::LedgerError;
use super::repository::{OperationTypeRepository, RepositoryError};
use super::types::{OperationTypeRecord, SeedReport};
use crate::operation::OperationType;

/// Operation type catalog service.
pub struct OperationCatalog<R: OperationTypeRepository> {
    repo: Arc<R>,
}

impl<R: OperationTypeRepository> Clone for OperationCatalog<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: OperationTypeRepository> OperationCatalog<R> {
    /// Create a new catalog.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Inserts every canonical operation type that is not present yet.
    ///
    /// Existing rows are never modified. A uniqueness violation on insert
    /// means a concurrent seeder got there first and counts as present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn seed(&self) -> Result<SeedReport, LedgerError> {
        let mut report = SeedReport::default();

        for op in OperationType::ALL {
            if self.repo.find_operation_type(op.id()).await?.is_some() {
                report.existing.push(op.id());
                continue;
            }

            match self.repo.create_operation_type(&op.into()).await {
                Ok(()) => report.inserted.push(op.id()),
                Err(RepositoryError::UniqueViolation(_)) => report.existing.push(op.id()),
                Err(e) => return Err(e.into()),
            }
        }

        Ok(report)
    }

    /// Looks up an operation type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn lookup(
        &self,
        id: OperationTypeId,
    ) -> Result<Option<OperationTypeRecord>, LedgerError> {
        Ok(self.repo.find_operation_type(id).await?)
    }

    /// Lists every operation type in the store, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self) -> Result<Vec<OperationTypeRecord>, LedgerError> {
        Ok(self.repo.list_operation_types().await?)
    }
}
