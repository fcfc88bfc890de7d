//! Storages service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::storages::{
        data::StoragesUpsert,
        errors::StoragesServiceError,
        records::StorageRecord,
        repositories::{PgProductStoragesRepository, PgStoragesRepository},
    },
    reconcile::{DeletePolicy, ReconcileStats, Reconciler},
};

#[derive(Debug, Clone)]
pub struct PgStoragesService {
    db: Db,
    storages: PgStoragesRepository,
    reconciler: Reconciler<PgStoragesRepository, PgProductStoragesRepository>,
}

impl PgStoragesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            storages: PgStoragesRepository::new(),
            reconciler: Reconciler::new(
                PgStoragesRepository::new(),
                PgProductStoragesRepository::new(),
                DeletePolicy::DeleteMissing,
            ),
        }
    }
}

#[async_trait]
impl StoragesService for PgStoragesService {
    #[tracing::instrument(name = "storages.service.upsert", skip_all, err)]
    async fn upsert(
        &self,
        upsert: StoragesUpsert,
    ) -> Result<ReconcileStats, StoragesServiceError> {
        let (storages, product_storages) = upsert.into_desired()?;

        let uow = self
            .db
            .begin_unit_of_work()
            .await
            .map_err(StoragesServiceError::storages)?;

        let stats = self
            .reconciler
            .run(&uow, storages, product_storages)
            .await?;

        uow.commit().await.map_err(StoragesServiceError::storages)?;

        Ok(stats)
    }

    async fn list_storages(&self) -> Result<Vec<StorageRecord>, StoragesServiceError> {
        let mut tx = self.db.begin().await?;

        let storages = self.storages.list_storages(&mut tx).await?;

        tx.commit().await?;

        if storages.is_empty() {
            return Err(StoragesServiceError::NotFound);
        }

        Ok(storages)
    }
}

#[automock]
#[async_trait]
pub trait StoragesService: Send + Sync {
    /// Reconcile storages and product quantities with the submitted desired state.
    async fn upsert(&self, upsert: StoragesUpsert)
    -> Result<ReconcileStats, StoragesServiceError>;

    /// Lists every storage, failing with `NotFound` when there are none.
    async fn list_storages(&self) -> Result<Vec<StorageRecord>, StoragesServiceError>;
}
