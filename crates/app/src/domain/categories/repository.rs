//! Categories Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashSet;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        Active,
        categories::{
            models::{Category, CategoryUuid},
            records::CategoryRecord,
        },
    },
    reconcile::MasterStore,
    uuids::raw_uuids,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const EXISTING_CATEGORY_UUIDS_SQL: &str = include_str!("sql/existing_category_uuids.sql");
const CREATE_CATEGORIES_SQL: &str = include_str!("sql/create_categories.sql");
const INSERT_CATEGORY_SQL: &str = include_str!("sql/insert_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const CATEGORY_TREE_SQL: &str = include_str!("sql/category_tree.sql");

/// Deepest level the tree query descends to.
const MAX_TREE_DEPTH: i32 = 64;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn existing_uuids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        categories: &[CategoryUuid],
    ) -> Result<FxHashSet<CategoryUuid>, sqlx::Error> {
        let rows: Vec<Uuid> = query_scalar(EXISTING_CATEGORY_UUIDS_SQL)
            .bind(raw_uuids(categories))
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(CategoryUuid::from_uuid).collect())
    }

    #[tracing::instrument(
        name = "categories.repository.create_categories",
        skip(self, tx, categories),
        fields(category_count = categories.len()),
        err
    )]
    pub(crate) async fn create_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        categories: &[Category],
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = categories.iter().map(|c| c.uuid.into_uuid()).collect();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        let actives: Vec<&str> = categories.iter().map(|c| c.active.as_str()).collect();
        let parents: Vec<Option<Uuid>> = categories
            .iter()
            .map(|c| c.parent_uuid.map(CategoryUuid::into_uuid))
            .collect();

        let created = query_as::<Postgres, CategoryRecord>(CREATE_CATEGORIES_SQL)
            .bind(&uuids)
            .bind(&names)
            .bind(&slugs)
            .bind(&actives)
            .bind(&parents)
            .fetch_all(&mut **tx)
            .await?;

        debug!(created = created.len(), "created categories");

        Ok(created)
    }

    #[tracing::instrument(
        name = "categories.repository.update_category",
        skip(self, tx, category),
        fields(uuid = %category.uuid),
        err
    )]
    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &Category,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.active.as_str())
            .bind(category.parent_uuid.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(name = "categories.repository.delete_category", skip(self, tx), err)]
    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Rows of the subtree under `root`, or of every root category, with their depth.
    pub(crate) async fn category_tree(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        root: Option<CategoryUuid>,
    ) -> Result<Vec<(CategoryRecord, i32)>, sqlx::Error> {
        let rows = query(CATEGORY_TREE_SQL)
            .bind(root.map(CategoryUuid::into_uuid))
            .bind(MAX_TREE_DEPTH)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| Ok((CategoryRecord::from_row(row)?, row.try_get("level")?)))
            .collect()
    }
}

#[async_trait]
impl MasterStore for PgCategoriesRepository {
    type Record = Category;

    const ENTITY: &'static str = "category";

    async fn list_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        Ok(self
            .list_categories(tx)
            .await?
            .into_iter()
            .map(Category::from)
            .collect())
    }

    #[tracing::instrument(
        name = "categories.repository.insert_category",
        skip(self, tx, record),
        fields(uuid = %record.uuid),
        err
    )]
    async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Category,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_CATEGORY_SQL)
            .bind(record.uuid.into_uuid())
            .bind(&record.name)
            .bind(&record.slug)
            .bind(record.active.as_str())
            .bind(record.parent_uuid.map(CategoryUuid::into_uuid))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Category,
    ) -> Result<(), sqlx::Error> {
        self.update_category(tx, record).await.map(drop)
    }

    async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: CategoryUuid,
    ) -> Result<(), sqlx::Error> {
        self.delete_category(tx, key).await.map(drop)
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            active: Active::try_get(row, "active")?,
            parent_uuid: row
                .try_get::<Option<Uuid>, _>("parent_uuid")?
                .map(CategoryUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
