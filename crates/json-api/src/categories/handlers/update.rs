//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::categories::{data::CategoryPatch, models::CategoryUuid};

use crate::{
    categories::{errors::into_api_error, get::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Category Request
///
/// Omitted or empty fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub active: Option<String>,
    pub parent_uuid: Option<Uuid>,
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryPatch {
            name: request.name,
            active: request.active,
            parent_uuid: request.parent_uuid,
        }
    }
}

/// Update Category Handler
#[endpoint(tags("categories"), summary = "Update Category")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: UpdateCategoryRequest = req.json_or_400().await?;

    let category = state
        .app
        .categories
        .update_category(CategoryUuid::from_uuid(uuid.into_inner()), body.into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(category.into()))
}
