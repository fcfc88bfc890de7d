//! Storage Models

use crate::{
    domain::{Active, products::ProductUuid},
    reconcile::{Association, Master},
    uuids::TypedUuid,
};

/// Storage UUID
pub type StorageUuid = TypedUuid<Storage>;

/// A warehouse or pickup point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    pub uuid: StorageUuid,
    pub name: String,
    pub active: Active,
}

impl Master for Storage {
    type Key = StorageUuid;

    fn key(&self) -> StorageUuid {
        self.uuid
    }

    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name && self.active == other.active
    }
}

/// Quantity of one product held in one storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStorage {
    pub product_uuid: ProductUuid,
    pub storage_uuid: StorageUuid,
    pub active: Active,
    pub quantity: i64,
}

impl Association for ProductStorage {
    type Owner = ProductUuid;
    type Key = StorageUuid;
    type Master = StorageUuid;

    fn owner(&self) -> ProductUuid {
        self.product_uuid
    }

    fn key(&self) -> StorageUuid {
        self.storage_uuid
    }

    fn master(&self) -> StorageUuid {
        self.storage_uuid
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.quantity == other.quantity && self.active == other.active
    }
}
