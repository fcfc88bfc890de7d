//! Price Models

use crate::{
    domain::{Active, products::ProductUuid},
    reconcile::{Association, Master},
    uuids::TypedUuid,
};

/// Price Type UUID
pub type TypePriceUuid = TypedUuid<TypePrice>;

/// A price type such as retail or wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePrice {
    pub uuid: TypePriceUuid,
    pub name: String,
    pub active: Active,
}

impl Master for TypePrice {
    type Key = TypePriceUuid;

    fn key(&self) -> TypePriceUuid {
        self.uuid
    }

    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name && self.active == other.active
    }
}

/// The price of one product under one price type.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPrice {
    pub product_uuid: ProductUuid,
    pub type_price_uuid: TypePriceUuid,
    pub active: Active,
    pub price: f64,
}

impl Association for ProductPrice {
    type Owner = ProductUuid;
    type Key = TypePriceUuid;
    type Master = TypePriceUuid;

    fn owner(&self) -> ProductUuid {
        self.product_uuid
    }

    fn key(&self) -> TypePriceUuid {
        self.type_price_uuid
    }

    fn master(&self) -> TypePriceUuid {
        self.type_price_uuid
    }

    fn same_payload(&self, other: &Self) -> bool {
        (self.price - other.price).abs() < f64::EPSILON && self.active == other.active
    }
}
