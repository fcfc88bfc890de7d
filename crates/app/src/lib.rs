//! Catalog domain, persistence and upsert-by-diff reconciliation.

pub mod context;
pub mod database;
pub mod domain;
pub mod reconcile;
pub mod uuids;
pub mod validation;

#[cfg(test)]
mod test;
