//! Category Errors

use tracing::error;

use catalog_app::domain::categories::CategoriesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CategoriesServiceError) -> ApiError {
    let message = error.to_string();

    match error {
        CategoriesServiceError::Validation(errors) => ApiError::validation(errors),
        CategoriesServiceError::NotFound => ApiError::not_found(message),
        CategoriesServiceError::NothingToInsert | CategoriesServiceError::MissingGeneral => {
            ApiError::bad_request(message)
        }
        CategoriesServiceError::Create(source)
        | CategoriesServiceError::Update(source)
        | CategoriesServiceError::Delete(source)
        | CategoriesServiceError::Upsert(source) => {
            error!("{message}: {source}");

            ApiError::bad_request(message)
        }
        CategoriesServiceError::Store(source) => {
            error!("{message}: {source}");

            ApiError::internal(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use catalog_app::database::StoreError;

    use super::*;

    #[test]
    fn write_failures_are_reported_as_bad_requests() {
        let error = into_api_error(CategoriesServiceError::Update(StoreError::Timeout));

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "произошла ошибка при обновлении категории");
    }

    #[test]
    fn read_failures_are_internal() {
        let error = into_api_error(CategoriesServiceError::Store(StoreError::Timeout));

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
