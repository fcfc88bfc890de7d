//! Property Values Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::properties::models::{PropertyUuid, PropertyValue},
    reconcile::AssociationStore,
    uuids::raw_uuids,
};

const LIST_PROPERTY_VALUES_SQL: &str = include_str!("sql/list_property_values.sql");
const INSERT_PROPERTY_VALUES_SQL: &str = include_str!("sql/insert_property_values.sql");
const UPDATE_PROPERTY_VALUES_SQL: &str = include_str!("sql/update_property_values.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPropertyValuesRepository;

impl PgPropertyValuesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    async fn write(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
        records: &[PropertyValue],
    ) -> Result<u64, sqlx::Error> {
        let property_uuids: Vec<Uuid> = records
            .iter()
            .map(|record| record.property_uuid.into_uuid())
            .collect();

        let [keys, values, slugs]: [Vec<&str>; 3] = records.iter().fold(
            [Vec::new(), Vec::new(), Vec::new()],
            |[mut keys, mut values, mut slugs], record| {
                keys.push(record.key.as_str());
                values.push(record.value.as_str());
                slugs.push(record.slug.as_str());
                [keys, values, slugs]
            },
        );

        Ok(query(sql)
            .bind(&property_uuids)
            .bind(&keys)
            .bind(&values)
            .bind(&slugs)
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

#[async_trait]
impl AssociationStore for PgPropertyValuesRepository {
    type Record = PropertyValue;

    const ENTITY: &'static str = "property_value";

    #[tracing::instrument(
        name = "properties.repository.list_property_values",
        skip(self, tx, owners),
        fields(property_count = owners.len()),
        err
    )]
    async fn list_for_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owners: &[PropertyUuid],
    ) -> Result<Vec<PropertyValue>, sqlx::Error> {
        query_as::<Postgres, PropertyValue>(LIST_PROPERTY_VALUES_SQL)
            .bind(raw_uuids(owners))
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "properties.repository.insert_property_values",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn insert_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[PropertyValue],
    ) -> Result<(), sqlx::Error> {
        let rows_affected = self.write(tx, INSERT_PROPERTY_VALUES_SQL, records).await?;

        debug!(rows_affected, "inserted property values");

        Ok(())
    }

    #[tracing::instrument(
        name = "properties.repository.update_property_values",
        skip(self, tx, records),
        fields(row_count = records.len()),
        err
    )]
    async fn update_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[PropertyValue],
    ) -> Result<(), sqlx::Error> {
        let rows_affected = self.write(tx, UPDATE_PROPERTY_VALUES_SQL, records).await?;

        debug!(rows_affected, "updated property values");

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for PropertyValue {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            property_uuid: PropertyUuid::from_uuid(row.try_get("property_uuid")?),
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            slug: row.try_get("slug")?,
        })
    }
}
