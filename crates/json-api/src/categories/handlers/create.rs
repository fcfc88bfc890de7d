//! Create Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::categories::data::CategoryData;

use crate::{
    categories::{errors::into_api_error, get::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// A category as submitted to create and upsert.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub name: String,

    /// `Y` or `N`
    #[serde(default)]
    pub active: String,

    pub parent_uuid: Option<Uuid>,
}

impl From<CategoryRequest> for CategoryData {
    fn from(request: CategoryRequest) -> Self {
        CategoryData {
            uuid: request.uuid,
            name: request.name,
            active: request.active,
            parent_uuid: request.parent_uuid,
        }
    }
}

/// Create Categories Handler
///
/// Creates the submitted categories, skipping UUIDs that already exist.
#[endpoint(
    tags("categories"),
    summary = "Create Categories",
    responses(
        (status_code = StatusCode::CREATED, description = "Categories created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: Vec<CategoryRequest> = req.json_or_400().await?;

    let created = state
        .app
        .categories
        .create_categories(body.into_iter().map(Into::into).collect())
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use catalog_app::{
        domain::categories::{CategoriesServiceError, MockCategoriesService, models::CategoryUuid},
        validation::FieldErrors,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{categories_service, make_category},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(categories, Router::with_path("create").post(handler))
    }

    #[tokio::test]
    async fn test_create_categories_returns_201_with_rows() -> TestResult {
        let parent = CategoryUuid::new();
        let child = CategoryUuid::new();
        let rows = vec![
            make_category(parent, "Обувь", "obuv", None),
            make_category(child, "Кеды", "kedy", Some(parent)),
        ];

        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_categories()
            .once()
            .withf(move |data| match data.as_slice() {
                [first, second] => {
                    first.uuid == Some(parent.into_uuid())
                        && second.parent_uuid == Some(parent.into_uuid())
                        && second.active == "Y"
                }
                _ => false,
            })
            .return_once(move |_| Ok(rows));

        let mut res = TestClient::post("http://example.com/create")
            .json(&json!([
                { "uuid": parent.into_uuid(), "name": "Обувь", "active": "Y" },
                {
                    "uuid": child.into_uuid(),
                    "name": "Кеды",
                    "active": "Y",
                    "parent_uuid": parent.into_uuid(),
                },
            ]))
            .send(&make_service(categories))
            .await;

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            body.iter().map(|c| c.parent_uuid).collect::<Vec<_>>(),
            [None, Some(parent.into_uuid())]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_existing_categories_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_categories()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NothingToInsert));

        let mut res = TestClient::post("http://example.com/create")
            .json(&json!([{ "uuid": CategoryUuid::new().into_uuid(), "name": "Обувь", "active": "Y" }]))
            .send(&make_service(categories))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "нет элементов для вставки");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_invalid_field_returns_field_map() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_categories()
            .once()
            .return_once(|_| {
                Err(CategoriesServiceError::Validation(FieldErrors::single(
                    "active",
                    "Поле active может быть одним из: Y или N",
                )))
            });

        let mut res = TestClient::post("http://example.com/create")
            .json(&json!([{ "uuid": CategoryUuid::new().into_uuid(), "name": "Обувь", "active": "maybe" }]))
            .send(&make_service(categories))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "ошибка в валидации поля");
        assert_eq!(
            body.errors.and_then(|errors| errors.get("active").cloned()),
            Some("Поле active может быть одним из: Y или N".to_owned())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_malformed_body_never_reaches_the_service() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_create_categories().never();

        let mut res = TestClient::post("http://example.com/create")
            .raw_json("{\"uuid\": ")
            .send(&make_service(categories))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Получен некорректный формат JSON");

        Ok(())
    }
}
