//! Property Errors

use tracing::error;

use catalog_app::domain::properties::PropertiesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: PropertiesServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        PropertiesServiceError::Validation(errors) => ApiError::validation(errors),
        PropertiesServiceError::NotFound => ApiError::not_found(message),
        PropertiesServiceError::MissingGeneral => ApiError::bad_request(message),
        PropertiesServiceError::Properties(source)
        | PropertiesServiceError::PropertyValues(source) => {
            error!("{message}: {source}");

            ApiError::bad_request(message)
        }
        PropertiesServiceError::Store(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
    }
}
