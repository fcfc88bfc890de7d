//! Auth Errors

use tracing::error;

use catalog_app::domain::auth_codes::AuthCodesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AuthCodesServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        AuthCodesServiceError::Validation(errors) => ApiError::validation(errors),
        AuthCodesServiceError::TooManyAttempts => ApiError::too_many_requests(message),
        AuthCodesServiceError::Send(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
        AuthCodesServiceError::Store(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
    }
}
