//! Categories service errors.

use thiserror::Error;

use crate::{database::StoreError, reconcile::ReconcileError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("ошибка в валидации поля")]
    Validation(#[from] FieldErrors),

    #[error("категория не найдена")]
    NotFound,

    #[error("нет элементов для вставки")]
    NothingToInsert,

    #[error("ошибка General должна быть заполнена")]
    MissingGeneral,

    #[error("произошла ошибка при создании категорий")]
    Create(#[source] StoreError),

    #[error("произошла ошибка при обновлении категории")]
    Update(#[source] StoreError),

    #[error("произошла ошибка при удалении категории")]
    Delete(#[source] StoreError),

    #[error("произошла ошибка при сохранении категорий")]
    Upsert(#[source] StoreError),

    #[error("произошла ошибка при получении категорий")]
    Store(#[source] StoreError),
}

impl CategoriesServiceError {
    fn classify(error: sqlx::Error, wrap: fn(StoreError) -> Self) -> Self {
        match StoreError::from(error) {
            StoreError::NotFound => Self::NotFound,
            other => wrap(other),
        }
    }

    pub(crate) fn create(error: sqlx::Error) -> Self {
        Self::classify(error, Self::Create)
    }

    pub(crate) fn update(error: sqlx::Error) -> Self {
        Self::classify(error, Self::Update)
    }

    pub(crate) fn delete(error: sqlx::Error) -> Self {
        Self::classify(error, Self::Delete)
    }

    pub(crate) fn upsert(error: sqlx::Error) -> Self {
        Self::classify(error, Self::Upsert)
    }
}

impl From<sqlx::Error> for CategoriesServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::classify(error, Self::Store)
    }
}

impl From<ReconcileError> for CategoriesServiceError {
    fn from(error: ReconcileError) -> Self {
        match error {
            ReconcileError::MissingGeneral => Self::MissingGeneral,
            ReconcileError::Masters { source, .. } | ReconcileError::Associations { source, .. } => {
                Self::Upsert(source)
            }
        }
    }
}
