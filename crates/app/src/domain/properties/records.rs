//! Property Records

use jiff::Timestamp;

use crate::domain::properties::models::PropertyUuid;

/// Property Record
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub id: i64,
    pub uuid: PropertyUuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
