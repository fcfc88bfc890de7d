//! Products
//!
//! Product records are owned elsewhere; prices and stocks only reference them by UUID.

use crate::uuids::TypedUuid;

/// Marker for product identifiers.
#[derive(Debug)]
pub struct Product;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;
