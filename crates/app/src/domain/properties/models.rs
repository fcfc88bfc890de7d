//! Property Models

use crate::{
    reconcile::{Association, Master},
    uuids::TypedUuid,
};

/// Property UUID
pub type PropertyUuid = TypedUuid<Property>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub uuid: PropertyUuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
}

impl Property {
    pub fn new(uuid: PropertyUuid, name: String, kind: String) -> Self {
        Self {
            slug: slug::slugify(&name),
            uuid,
            name,
            kind,
        }
    }
}

impl Master for Property {
    type Key = PropertyUuid;

    fn key(&self) -> PropertyUuid {
        self.uuid
    }

    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name && self.slug == other.slug && self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    pub property_uuid: PropertyUuid,
    pub key: String,
    pub value: String,
    pub slug: String,
}

impl PropertyValue {
    pub fn new(property_uuid: PropertyUuid, key: String, value: String) -> Self {
        Self {
            slug: slug::slugify(&value),
            property_uuid,
            key,
            value,
        }
    }
}

impl Association for PropertyValue {
    type Owner = PropertyUuid;
    type Key = String;
    type Master = PropertyUuid;

    fn owner(&self) -> PropertyUuid {
        self.property_uuid
    }

    fn key(&self) -> String {
        self.key.clone()
    }

    fn master(&self) -> PropertyUuid {
        self.property_uuid
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.value == other.value && self.slug == other.slug
    }
}
