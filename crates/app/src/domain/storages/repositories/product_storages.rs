//! Product Storages Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        Active,
        products::ProductUuid,
        storages::models::{ProductStorage, StorageUuid},
    },
    reconcile::AssociationStore,
    uuids::raw_uuids,
};

const LIST_PRODUCT_STORAGES_SQL: &str = include_str!("sql/list_product_storages.sql");
const INSERT_PRODUCT_STORAGES_SQL: &str = include_str!("sql/insert_product_storages.sql");
const UPDATE_PRODUCT_STORAGES_SQL: &str = include_str!("sql/update_product_storages.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductStoragesRepository;

impl PgProductStoragesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    async fn write(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
        records: &[ProductStorage],
    ) -> Result<u64, sqlx::Error> {
        let mut product_uuids: Vec<Uuid> = Vec::with_capacity(records.len());
        let mut storage_uuids: Vec<Uuid> = Vec::with_capacity(records.len());
        let mut actives: Vec<&str> = Vec::with_capacity(records.len());
        let mut quantities: Vec<i64> = Vec::with_capacity(records.len());

        for record in records {
            product_uuids.push(record.product_uuid.into_uuid());
            storage_uuids.push(record.storage_uuid.into_uuid());
            actives.push(record.active.as_str());
            quantities.push(record.quantity);
        }

        Ok(query(sql)
            .bind(&product_uuids)
            .bind(&storage_uuids)
            .bind(&actives)
            .bind(&quantities)
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

#[async_trait]
impl AssociationStore for PgProductStoragesRepository {
    type Record = ProductStorage;

    const ENTITY: &'static str = "product_storage";

    #[tracing::instrument(
        name = "storages.repository.list_product_storages",
        skip(self, tx, owners),
        fields(product_count = owners.len()),
        err
    )]
    async fn list_for_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owners: &[ProductUuid],
    ) -> Result<Vec<ProductStorage>, sqlx::Error> {
        query_as::<Postgres, ProductStorage>(LIST_PRODUCT_STORAGES_SQL)
            .bind(raw_uuids(owners))
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "storages.repository.insert_product_storages",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn insert_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[ProductStorage],
    ) -> Result<(), sqlx::Error> {
        let rows_affected = self.write(tx, INSERT_PRODUCT_STORAGES_SQL, records).await?;

        debug!(rows_affected, "inserted product storages");

        Ok(())
    }

    #[tracing::instrument(
        name = "storages.repository.update_product_storages",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn update_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[ProductStorage],
    ) -> Result<(), sqlx::Error> {
        let rows_affected = self.write(tx, UPDATE_PRODUCT_STORAGES_SQL, records).await?;

        debug!(rows_affected, "updated product storages");

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductStorage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            storage_uuid: StorageUuid::from_uuid(row.try_get("storage_uuid")?),
            active: Active::try_get(row, "active")?,
            quantity: row.try_get("quantity")?,
        })
    }
}
