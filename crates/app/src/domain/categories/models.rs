//! Category Models

use crate::{domain::Active, reconcile::Master, uuids::TypedUuid};

use super::records::CategoryRecord;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// A category as written by create and upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub active: Active,
    pub parent_uuid: Option<CategoryUuid>,
}

impl Category {
    pub fn new(
        uuid: CategoryUuid,
        name: String,
        active: Active,
        parent_uuid: Option<CategoryUuid>,
    ) -> Self {
        Self {
            slug: slug::slugify(&name),
            uuid,
            name,
            active,
            parent_uuid,
        }
    }

    /// Apply a partial update. Empty names are ignored.
    #[must_use]
    pub fn patched(mut self, update: CategoryUpdate) -> Self {
        if let Some(name) = update.name.filter(|name| !name.is_empty()) {
            self.slug = slug::slugify(&name);
            self.name = name;
        }

        if let Some(active) = update.active {
            self.active = active;
        }

        if let Some(parent_uuid) = update.parent_uuid {
            self.parent_uuid = Some(parent_uuid);
        }

        self
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name,
            slug: record.slug,
            active: record.active,
            parent_uuid: record.parent_uuid,
        }
    }
}

impl Master for Category {
    type Key = CategoryUuid;

    fn key(&self) -> CategoryUuid {
        self.uuid
    }

    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name
            && self.slug == other.slug
            && self.active == other.active
            && self.parent_uuid == other.parent_uuid
    }
}

/// Fields changed by a category update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub active: Option<Active>,
    pub parent_uuid: Option<CategoryUuid>,
}

/// A category with its depth below the requested root and its children.
#[derive(Debug, Clone)]
pub struct CategoryTree {
    pub category: CategoryRecord,
    pub level: i32,
    pub children: Vec<CategoryTree>,
}
