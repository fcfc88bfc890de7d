//! Prices service errors.

use thiserror::Error;

use crate::{database::StoreError, reconcile::ReconcileError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum PricesServiceError {
    #[error("ошибка в валидации поля")]
    Validation(#[from] FieldErrors),

    #[error("ошибка General должна быть заполнена")]
    MissingGeneral,

    #[error("типы цен не найдены")]
    NotFound,

    #[error("произошла ошибка при создании типа цены")]
    TypePrices(#[source] StoreError),

    #[error("произошла ошибка при создании цен у товаров")]
    ProductPrices(#[source] StoreError),

    #[error("произошла ошибка при получении типов цен")]
    Store(#[source] StoreError),
}

impl PricesServiceError {
    /// Failures opening or committing the unit of work of an upsert.
    pub(crate) fn type_prices(error: sqlx::Error) -> Self {
        Self::TypePrices(error.into())
    }
}

impl From<sqlx::Error> for PricesServiceError {
    fn from(error: sqlx::Error) -> Self {
        match StoreError::from(error) {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<ReconcileError> for PricesServiceError {
    fn from(error: ReconcileError) -> Self {
        match error {
            ReconcileError::MissingGeneral => Self::MissingGeneral,
            ReconcileError::Masters { source, .. } => Self::TypePrices(source),
            ReconcileError::Associations { source, .. } => Self::ProductPrices(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_failures_keep_their_cause() {
        let error = PricesServiceError::from(ReconcileError::Associations {
            entity: "product_price",
            source: StoreError::InvalidReference,
        });

        assert!(
            matches!(
                error,
                PricesServiceError::ProductPrices(StoreError::InvalidReference)
            ),
            "expected ProductPrices, got {error:?}"
        );
        assert_eq!(
            error.to_string(),
            "произошла ошибка при создании цен у товаров"
        );
    }
}
