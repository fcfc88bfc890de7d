//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoriesUpsert, CategoryData, CategoryPatch},
        errors::CategoriesServiceError,
        models::{Category, CategoryTree, CategoryUuid},
        records::CategoryRecord,
        repository::PgCategoriesRepository,
        tree::build_tree,
    },
    reconcile::{DeletePolicy, MasterStats, reconcile_masters},
    validation::FieldErrors,
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        if categories.is_empty() {
            return Err(CategoriesServiceError::NotFound);
        }

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "categories.service.create_categories",
        skip_all,
        fields(requested = categories.len()),
        err
    )]
    async fn create_categories(
        &self,
        categories: Vec<CategoryData>,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let categories = categories
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, FieldErrors>>()?;

        let mut tx = self.db.begin().await?;

        let uuids: Vec<CategoryUuid> = categories.iter().map(|c| c.uuid).collect();
        let existing = self.repository.existing_uuids(&mut tx, &uuids).await?;

        let fresh: Vec<Category> = categories
            .into_iter()
            .filter(|category| !existing.contains(&category.uuid))
            .collect();

        if fresh.is_empty() {
            return Err(CategoriesServiceError::NothingToInsert);
        }

        let created = self
            .repository
            .create_categories(&mut tx, &fresh)
            .await
            .map_err(CategoriesServiceError::create)?;

        tx.commit().await.map_err(CategoriesServiceError::create)?;

        info!(
            created = created.len(),
            skipped = existing.len(),
            "categories created"
        );

        Ok(created)
    }

    #[tracing::instrument(name = "categories.service.update_category", skip(self, patch), err)]
    async fn update_category(
        &self,
        category: CategoryUuid,
        patch: CategoryPatch,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let update = patch.into_update(category)?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_category(&mut tx, category).await?;
        let patched = Category::from(current).patched(update);

        let updated = self
            .repository
            .update_category(&mut tx, &patched)
            .await
            .map_err(CategoriesServiceError::update)?;

        tx.commit().await.map_err(CategoriesServiceError::update)?;

        Ok(updated)
    }

    #[tracing::instrument(name = "categories.service.delete_category", skip(self), err)]
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_category(&mut tx, category)
            .await
            .map_err(CategoriesServiceError::delete)?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await.map_err(CategoriesServiceError::delete)?;

        Ok(())
    }

    async fn category_tree(
        &self,
        root: Option<CategoryUuid>,
    ) -> Result<Vec<CategoryTree>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.repository.category_tree(&mut tx, root).await?;

        tx.commit().await?;

        if root.is_some() && rows.is_empty() {
            return Err(CategoriesServiceError::NotFound);
        }

        Ok(build_tree(rows))
    }

    #[tracing::instrument(name = "categories.service.upsert", skip_all, err)]
    async fn upsert(&self, upsert: CategoriesUpsert) -> Result<MasterStats, CategoriesServiceError> {
        let desired = upsert.into_desired()?;

        let uow = self
            .db
            .begin_unit_of_work()
            .await
            .map_err(CategoriesServiceError::upsert)?;

        let stats = reconcile_masters(&self.repository, &uow, desired, DeletePolicy::KeepMissing)
            .await?;

        uow.commit().await.map_err(CategoriesServiceError::upsert)?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Lists every category, failing with `NotFound` when there are none.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates the categories whose UUIDs are not taken yet.
    async fn create_categories(
        &self,
        categories: Vec<CategoryData>,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    async fn update_category(
        &self,
        category: CategoryUuid,
        patch: CategoryPatch,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;

    /// The subtree under `root`, or the whole forest when no root is given.
    async fn category_tree(
        &self,
        root: Option<CategoryUuid>,
    ) -> Result<Vec<CategoryTree>, CategoriesServiceError>;

    /// Insert and update categories to match `upsert`; categories it omits are kept.
    async fn upsert(&self, upsert: CategoriesUpsert) -> Result<MasterStats, CategoriesServiceError>;
}
