//! Product Prices Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        Active,
        prices::models::{ProductPrice, TypePriceUuid},
        products::ProductUuid,
    },
    reconcile::AssociationStore,
    uuids::raw_uuids,
};

const LIST_PRODUCT_PRICES_SQL: &str = include_str!("sql/list_product_prices.sql");
const INSERT_PRODUCT_PRICES_SQL: &str = include_str!("sql/insert_product_prices.sql");
const UPDATE_PRODUCT_PRICES_SQL: &str = include_str!("sql/update_product_prices.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductPricesRepository;

impl PgProductPricesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }
}

/// Column-wise view of a batch, bound as one array per column.
#[derive(Default)]
struct Columns {
    product_uuids: Vec<Uuid>,
    type_price_uuids: Vec<Uuid>,
    actives: Vec<&'static str>,
    prices: Vec<f64>,
}

impl From<&[ProductPrice]> for Columns {
    fn from(records: &[ProductPrice]) -> Self {
        records.iter().fold(Self::default(), |mut columns, record| {
            columns.product_uuids.push(record.product_uuid.into_uuid());
            columns.type_price_uuids.push(record.type_price_uuid.into_uuid());
            columns.actives.push(record.active.as_str());
            columns.prices.push(record.price);
            columns
        })
    }
}

#[async_trait]
impl AssociationStore for PgProductPricesRepository {
    type Record = ProductPrice;

    const ENTITY: &'static str = "product_price";

    #[tracing::instrument(
        name = "prices.repository.list_product_prices",
        skip(self, tx, owners),
        fields(product_count = owners.len()),
        err
    )]
    async fn list_for_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owners: &[ProductUuid],
    ) -> Result<Vec<ProductPrice>, sqlx::Error> {
        query_as::<Postgres, ProductPrice>(LIST_PRODUCT_PRICES_SQL)
            .bind(raw_uuids(owners))
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "prices.repository.insert_product_prices",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn insert_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[ProductPrice],
    ) -> Result<(), sqlx::Error> {
        let columns = Columns::from(records);

        query(INSERT_PRODUCT_PRICES_SQL)
            .bind(&columns.product_uuids)
            .bind(&columns.type_price_uuids)
            .bind(&columns.actives)
            .bind(&columns.prices)
            .execute(&mut **tx)
            .await?;

        debug!(row_count = records.len(), "inserted product prices");

        Ok(())
    }

    #[tracing::instrument(
        name = "prices.repository.update_product_prices",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn update_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[ProductPrice],
    ) -> Result<(), sqlx::Error> {
        let columns = Columns::from(records);

        let rows_affected = query(UPDATE_PRODUCT_PRICES_SQL)
            .bind(&columns.product_uuids)
            .bind(&columns.type_price_uuids)
            .bind(&columns.actives)
            .bind(&columns.prices)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(rows_affected, "updated product prices");

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductPrice {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            type_price_uuid: TypePriceUuid::from_uuid(row.try_get("type_price_uuid")?),
            active: Active::try_get(row, "active")?,
            price: row.try_get("price")?,
        })
    }
}
