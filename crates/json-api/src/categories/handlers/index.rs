//! Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_api_error, get::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Category Index Handler
///
/// Returns every category.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_api_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
