//! Storages Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        Active,
        storages::{
            models::{Storage, StorageUuid},
            records::StorageRecord,
        },
    },
    reconcile::MasterStore,
};

const LIST_STORAGES_SQL: &str = include_str!("sql/list_storages.sql");
const INSERT_STORAGE_SQL: &str = include_str!("sql/insert_storage.sql");
const UPDATE_STORAGE_SQL: &str = include_str!("sql/update_storage.sql");
const DELETE_STORAGE_SQL: &str = include_str!("sql/delete_storage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoragesRepository;

impl PgStoragesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_storages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StorageRecord>, sqlx::Error> {
        query_as::<Postgres, StorageRecord>(LIST_STORAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

#[async_trait]
impl MasterStore for PgStoragesRepository {
    type Record = Storage;

    const ENTITY: &'static str = "storage";

    async fn list_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Storage>, sqlx::Error> {
        Ok(self
            .list_storages(tx)
            .await?
            .into_iter()
            .map(|record| Storage {
                uuid: record.uuid,
                name: record.name,
                active: record.active,
            })
            .collect())
    }

    #[tracing::instrument(
        name = "storages.repository.insert_storage",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Storage,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_STORAGE_SQL)
            .bind(record.uuid.into_uuid())
            .bind(&record.name)
            .bind(record.active.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "storages.repository.update_storage",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Storage,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_STORAGE_SQL)
            .bind(record.uuid.into_uuid())
            .bind(&record.name)
            .bind(record.active.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "storages.repository.delete_storage", skip(self, tx), err)]
    async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: StorageUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_STORAGE_SQL)
            .bind(key.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for StorageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: StorageUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            active: Active::try_get(row, "active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
