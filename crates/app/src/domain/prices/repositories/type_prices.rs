//! Price Types Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        Active,
        prices::{
            models::{TypePrice, TypePriceUuid},
            records::TypePriceRecord,
        },
    },
    reconcile::MasterStore,
};

const LIST_TYPE_PRICES_SQL: &str = include_str!("sql/list_type_prices.sql");
const INSERT_TYPE_PRICE_SQL: &str = include_str!("sql/insert_type_price.sql");
const UPDATE_TYPE_PRICE_SQL: &str = include_str!("sql/update_type_price.sql");
const DELETE_TYPE_PRICE_SQL: &str = include_str!("sql/delete_type_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTypePricesRepository;

impl PgTypePricesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_type_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TypePriceRecord>, sqlx::Error> {
        query_as::<Postgres, TypePriceRecord>(LIST_TYPE_PRICES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

#[async_trait]
impl MasterStore for PgTypePricesRepository {
    type Record = TypePrice;

    const ENTITY: &'static str = "type_price";

    async fn list_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TypePrice>, sqlx::Error> {
        let records = self.list_type_prices(tx).await?;

        Ok(records
            .into_iter()
            .map(|record| TypePrice {
                uuid: record.uuid,
                name: record.name,
                active: record.active,
            })
            .collect())
    }

    #[tracing::instrument(
        name = "prices.repository.insert_type_price",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &TypePrice,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_TYPE_PRICE_SQL)
            .bind(record.uuid.into_uuid())
            .bind(&record.name)
            .bind(record.active.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "prices.repository.update_type_price",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &TypePrice,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_TYPE_PRICE_SQL)
            .bind(record.uuid.into_uuid())
            .bind(&record.name)
            .bind(record.active.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "prices.repository.delete_type_price", skip(self, tx), err)]
    async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: TypePriceUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_TYPE_PRICE_SQL)
            .bind(key.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for TypePriceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: TypePriceUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            active: Active::try_get(row, "active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
