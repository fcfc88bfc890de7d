//! Upsert Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use catalog_app::domain::categories::data::CategoriesUpsert;

use crate::{
    categories::{create::CategoryRequest, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
    stats::{self, MasterStatsResponse},
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertCategoriesRequest {
    pub categories: Option<Vec<CategoryRequest>>,
}

impl From<UpsertCategoriesRequest> for CategoriesUpsert {
    fn from(request: UpsertCategoriesRequest) -> Self {
        CategoriesUpsert {
            categories: request
                .categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertCategoriesResponse {
    pub category: MasterStatsResponse,
}

/// Upsert Categories Handler
///
/// Inserts new and updates changed categories. Categories missing from the body are kept.
#[endpoint(
    tags("categories"),
    summary = "Upsert Categories",
    responses(
        (status_code = StatusCode::CREATED, description = "Categories reconciled"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UpsertCategoriesResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: UpsertCategoriesRequest = req.json_or_400().await?;

    let category = state
        .app
        .categories
        .upsert(body.into())
        .await
        .map_err(into_api_error)?;

    stats::record_masters("category", "category", &category);

    res.status_code(StatusCode::CREATED);

    Ok(Json(UpsertCategoriesResponse {
        category: category.into(),
    }))
}
