//! Properties Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::properties::{
        models::{Property, PropertyUuid},
        records::PropertyRecord,
    },
    reconcile::MasterStore,
};

const LIST_PROPERTIES_SQL: &str = include_str!("sql/list_properties.sql");
const INSERT_PROPERTY_SQL: &str = include_str!("sql/insert_property.sql");
const UPDATE_PROPERTY_SQL: &str = include_str!("sql/update_property.sql");
const DELETE_PROPERTY_SQL: &str = include_str!("sql/delete_property.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPropertiesRepository;

impl PgPropertiesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_properties(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PropertyRecord>, sqlx::Error> {
        query_as::<Postgres, PropertyRecord>(LIST_PROPERTIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    async fn write(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
        property: &Property,
    ) -> Result<(), sqlx::Error> {
        query(sql)
            .bind(property.uuid.into_uuid())
            .bind(&property.name)
            .bind(&property.slug)
            .bind(&property.kind)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MasterStore for PgPropertiesRepository {
    type Record = Property;

    const ENTITY: &'static str = "property";

    async fn list_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Property>, sqlx::Error> {
        Ok(self
            .list_properties(tx)
            .await?
            .into_iter()
            .map(|record| Property {
                uuid: record.uuid,
                name: record.name,
                slug: record.slug,
                kind: record.kind,
            })
            .collect())
    }

    #[tracing::instrument(
        name = "properties.repository.insert_property",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Property,
    ) -> Result<(), sqlx::Error> {
        self.write(tx, INSERT_PROPERTY_SQL, record).await
    }

    #[tracing::instrument(
        name = "properties.repository.update_property",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Property,
    ) -> Result<(), sqlx::Error> {
        self.write(tx, UPDATE_PROPERTY_SQL, record).await
    }

    #[tracing::instrument(name = "properties.repository.delete_property", skip(self, tx), err)]
    async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: PropertyUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_PROPERTY_SQL)
            .bind(key.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for PropertyRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: PropertyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            kind: row.try_get("type")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
