//! Price Errors

use tracing::error;

use catalog_app::domain::prices::PricesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: PricesServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        PricesServiceError::Validation(errors) => ApiError::validation(errors),
        PricesServiceError::NotFound => ApiError::not_found(message),
        PricesServiceError::MissingGeneral => ApiError::bad_request(message),
        PricesServiceError::TypePrices(source) | PricesServiceError::ProductPrices(source) => {
            error!("{message}: {source}");

            ApiError::bad_request(message)
        }
        PricesServiceError::Store(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
    }
}
