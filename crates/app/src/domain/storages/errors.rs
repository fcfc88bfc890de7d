//! Storages service errors.

use thiserror::Error;

use crate::{database::StoreError, reconcile::ReconcileError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum StoragesServiceError {
    #[error("ошибка в валидации поля")]
    Validation(#[from] FieldErrors),

    #[error("ошибка General должна быть заполнена")]
    MissingGeneral,

    #[error("склады не найдены")]
    NotFound,

    #[error("произошла ошибка при создании склада")]
    Storages(#[source] StoreError),

    #[error("произошла ошибка при записи складов для товара")]
    ProductStorages(#[source] StoreError),

    #[error("произошла ошибка при получении складов")]
    Store(#[source] StoreError),
}

impl StoragesServiceError {
    /// Failures opening or committing the unit of work of an upsert.
    pub(crate) fn storages(error: sqlx::Error) -> Self {
        Self::Storages(error.into())
    }
}

impl From<sqlx::Error> for StoragesServiceError {
    fn from(error: sqlx::Error) -> Self {
        match StoreError::from(error) {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<ReconcileError> for StoragesServiceError {
    fn from(error: ReconcileError) -> Self {
        match error {
            ReconcileError::MissingGeneral => Self::MissingGeneral,
            ReconcileError::Masters { source, .. } => Self::Storages(source),
            ReconcileError::Associations { source, .. } => Self::ProductStorages(source),
        }
    }
}
