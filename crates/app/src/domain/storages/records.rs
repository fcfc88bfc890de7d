//! Storage Records

use jiff::Timestamp;

use crate::domain::{Active, storages::models::StorageUuid};

/// Storage Record
#[derive(Debug, Clone)]
pub struct StorageRecord {
    pub id: i64,
    pub uuid: StorageUuid,
    pub name: String,
    pub active: Active,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
