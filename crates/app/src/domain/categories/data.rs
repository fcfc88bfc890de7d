//! Category payloads.

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        Active,
        categories::models::{Category, CategoryUpdate, CategoryUuid},
    },
    validation::{self, FieldErrors, required},
};

const SELF_PARENT: &str = "Поле parent_uuid не может ссылаться на саму категорию";

/// A category submitted to create or upsert.
#[derive(Debug, Clone, Default, Validate)]
pub struct CategoryData {
    #[validate(required)]
    pub uuid: Option<Uuid>,

    #[validate(length(min = 1, code = "required"))]
    pub name: String,

    #[validate(
        length(min = 1, code = "required"),
        custom(function = "crate::validation::one_of_listed_active")
    )]
    pub active: String,

    pub parent_uuid: Option<Uuid>,
}

impl TryFrom<CategoryData> for Category {
    type Error = FieldErrors;

    fn try_from(data: CategoryData) -> Result<Self, Self::Error> {
        validation::check(&data)?;

        let uuid = required(data.uuid, "uuid")?;

        if data.parent_uuid == Some(uuid) {
            return Err(FieldErrors::single("parent_uuid", SELF_PARENT));
        }

        Ok(Self::new(
            CategoryUuid::from_uuid(uuid),
            data.name,
            Active::parse_listed_field(&data.active, "active")?,
            data.parent_uuid.map(CategoryUuid::from_uuid),
        ))
    }
}

/// Partial update of one category.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub active: Option<String>,
    pub parent_uuid: Option<Uuid>,
}

impl CategoryPatch {
    pub(crate) fn into_update(self, target: CategoryUuid) -> Result<CategoryUpdate, FieldErrors> {
        if self.parent_uuid == Some(target.into_uuid()) {
            return Err(FieldErrors::single("parent_uuid", SELF_PARENT));
        }

        let active = match self.active.as_deref() {
            None | Some("") => None,
            Some(active) => Some(Active::parse_listed_field(active, "active")?),
        };

        Ok(CategoryUpdate {
            name: self.name,
            active,
            parent_uuid: self.parent_uuid.map(CategoryUuid::from_uuid),
        })
    }
}

/// Desired state of the category table. Categories missing from it are kept.
#[derive(Debug, Clone, Default)]
pub struct CategoriesUpsert {
    pub categories: Option<Vec<CategoryData>>,
}

impl CategoriesUpsert {
    pub(crate) fn into_desired(self) -> Result<Option<Vec<Category>>, FieldErrors> {
        self.categories
            .map(|categories| categories.into_iter().map(Category::try_from).collect())
            .transpose()
    }
}
