//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::categories::{models::CategoryUuid, records::CategoryRecord};

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: i64,

    /// The unique identifier of the category
    pub uuid: Uuid,

    pub name: String,

    /// URL-safe form of the name
    pub slug: String,

    /// `Y` or `N`
    pub active: String,

    /// The parent category, absent for roots
    pub parent_uuid: Option<Uuid>,

    /// The date and time the category was created
    pub created_at: String,

    /// The date and time the category was last updated
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            id: category.id,
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            active: category.active.as_str().to_owned(),
            parent_uuid: category.parent_uuid.map(Into::into),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// Get Category Handler
///
/// Returns a category.
#[endpoint(tags("categories"), summary = "Get Category")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(CategoryUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::{
        errors::ErrorResponse,
        test_helpers::{categories_service, make_category},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(categories, Router::with_path("category/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_category_returns_the_record() -> TestResult {
        let uuid = CategoryUuid::new();
        let parent = CategoryUuid::new();
        let category = make_category(uuid, "Обувь", "obuv", Some(parent));

        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(category));

        let mut res = TestClient::get(format!("http://example.com/category/{uuid}"))
            .send(&make_service(categories))
            .await;

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.slug, "obuv");
        assert_eq!(body.active, "Y");
        assert_eq!(body.parent_uuid, Some(parent.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_category_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let mut res = TestClient::get(format!(
            "http://example.com/category/{}",
            CategoryUuid::new()
        ))
        .send(&make_service(categories))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "категория не найдена");

        Ok(())
    }
}
