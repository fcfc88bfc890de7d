//! Category Tree Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::categories::models::{CategoryTree, CategoryUuid};

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, state::State,
};

/// A category with its depth and nested children.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryTreeResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub active: String,
    pub parent_uuid: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,

    /// Depth below the requested root, starting at 1
    pub level: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryTreeResponse>,
}

impl From<CategoryTree> for CategoryTreeResponse {
    fn from(node: CategoryTree) -> Self {
        let category = node.category;

        CategoryTreeResponse {
            id: category.id,
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            active: category.active.as_str().to_owned(),
            parent_uuid: category.parent_uuid.map(Into::into),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
            level: node.level,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

async fn render(
    depot: &Depot,
    root: Option<CategoryUuid>,
) -> Result<Json<Vec<CategoryTreeResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tree = state
        .app
        .categories
        .category_tree(root)
        .await
        .map_err(into_api_error)?;

    Ok(Json(tree.into_iter().map(Into::into).collect()))
}

/// Category Tree Handler
///
/// Returns every root category with its descendants.
#[endpoint(tags("categories"), summary = "Category Tree")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryTreeResponse>>, ApiError> {
    render(depot, None).await
}

/// Category Subtree Handler
///
/// Returns the category and its descendants.
#[endpoint(tags("categories"), summary = "Category Subtree")]
pub(crate) async fn subtree_handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<CategoryTreeResponse>>, ApiError> {
    render(depot, Some(CategoryUuid::from_uuid(uuid.into_inner()))).await
}
