//! Delete Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::categories::models::CategoryUuid;

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDeletedResponse {
    /// Deleted category UUID
    pub uuid: Uuid,
}

/// Delete Category Handler
///
/// Children of the deleted category become roots.
#[endpoint(tags("categories"), summary = "Delete Category")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();

    state
        .app
        .categories
        .delete_category(CategoryUuid::from_uuid(uuid))
        .await
        .map_err(into_api_error)?;

    Ok(Json(CategoryDeletedResponse { uuid }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::test_helpers::categories_service;

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(
            categories,
            Router::with_path("delete/{uuid}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_category_echoes_the_uuid() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(move |target| *target == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/delete/{uuid}"))
            .send(&make_service(categories))
            .await;

        let body: CategoryDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_category_returns_404() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/delete/{}",
            CategoryUuid::new()
        ))
        .send(&make_service(categories))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
