//! Storage Errors

use tracing::error;

use catalog_app::domain::storages::StoragesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: StoragesServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        StoragesServiceError::Validation(errors) => ApiError::validation(errors),
        StoragesServiceError::NotFound => ApiError::not_found(message),
        StoragesServiceError::MissingGeneral => ApiError::bad_request(message),
        StoragesServiceError::Storages(source) | StoragesServiceError::ProductStorages(source) => {
            error!("{message}: {source}");

            ApiError::bad_request(message)
        }
        StoragesServiceError::Store(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
    }
}
