//! Category Records

use jiff::Timestamp;

use crate::domain::{Active, categories::models::CategoryUuid};

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: i64,
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub active: Active,
    pub parent_uuid: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
