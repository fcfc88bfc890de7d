//! Properties service errors.

use thiserror::Error;

use crate::{database::StoreError, reconcile::ReconcileError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum PropertiesServiceError {
    #[error("ошибка в валидации поля")]
    Validation(#[from] FieldErrors),

    #[error("ошибка General должна быть заполнена")]
    MissingGeneral,

    #[error("свойства не найдены")]
    NotFound,

    #[error("произошла ошибка при создании свойства")]
    Properties(#[source] StoreError),

    #[error("произошла ошибка при записи значений свойства")]
    PropertyValues(#[source] StoreError),

    #[error("произошла ошибка при получении свойств")]
    Store(#[source] StoreError),
}

impl PropertiesServiceError {
    /// Failures opening or committing the unit of work of an upsert.
    pub(crate) fn properties(error: sqlx::Error) -> Self {
        Self::Properties(error.into())
    }
}

impl From<sqlx::Error> for PropertiesServiceError {
    fn from(error: sqlx::Error) -> Self {
        match StoreError::from(error) {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<ReconcileError> for PropertiesServiceError {
    fn from(error: ReconcileError) -> Self {
        match error {
            ReconcileError::MissingGeneral => Self::MissingGeneral,
            ReconcileError::Masters { source, .. } => Self::Properties(source),
            ReconcileError::Associations { source, .. } => Self::PropertyValues(source),
        }
    }
}
