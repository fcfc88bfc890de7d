//! App Router

use salvo::Router;

use crate::{auth, categories, prices, properties, storages};

/// Module routes, mounted under `/api`.
///
/// Literal segments are pushed before `{uuid}` so they win the match.
pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("category")
                .push(Router::with_path("categories").get(categories::index::handler))
                .push(Router::with_path("create").post(categories::create::handler))
                .push(Router::with_path("upsert").post(categories::upsert::handler))
                .push(
                    Router::with_path("tree")
                        .get(categories::tree::handler)
                        .push(Router::with_path("{uuid}").get(categories::tree::subtree_handler)),
                )
                .push(Router::with_path("update/{uuid}").put(categories::update::handler))
                .push(Router::with_path("delete/{uuid}").delete(categories::delete::handler))
                .push(Router::with_path("{uuid}").get(categories::get::handler)),
        )
        .push(
            Router::with_path("price")
                .push(Router::with_path("upsert").post(prices::upsert::handler))
                .push(Router::with_path("type-price").get(prices::index::handler)),
        )
        .push(
            Router::with_path("storage")
                .push(Router::with_path("upsert").post(storages::upsert::handler))
                .push(Router::with_path("storages").get(storages::index::handler)),
        )
        .push(
            Router::with_path("property")
                .push(Router::with_path("upsert").post(properties::upsert::handler))
                .push(Router::with_path("properties").get(properties::index::handler)),
        )
        .push(Router::with_path("auth/sendCode").post(auth::send_code::handler))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use catalog_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, models::CategoryUuid,
    };

    use crate::{
        categories::tree::CategoryTreeResponse,
        test_helpers::{app_service, categories_service, strict_app},
    };

    use super::*;

    fn api() -> Router {
        Router::with_path("api").push(app_router())
    }

    #[tokio::test]
    async fn test_tree_is_not_taken_for_a_category_uuid() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_tree()
            .once()
            .withf(|root| root.is_none())
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/api/category/tree")
            .send(&categories_service(categories, api()))
            .await;

        let body: Vec<CategoryTreeResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty(), "empty table yields an empty forest");

        Ok(())
    }

    #[tokio::test]
    async fn test_category_uuid_route_reaches_get() {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/api/category/{uuid}"))
            .send(&categories_service(categories, api()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let res = TestClient::get("http://example.com/api/nothing/here")
            .send(&app_service(strict_app(), api()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
