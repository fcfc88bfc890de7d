//! Price Records

use jiff::Timestamp;

use crate::domain::{Active, prices::models::TypePriceUuid};

/// Price Type Record
#[derive(Debug, Clone)]
pub struct TypePriceRecord {
    pub id: i64,
    pub uuid: TypePriceUuid,
    pub name: String,
    pub active: Active,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
