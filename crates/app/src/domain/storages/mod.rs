//! Storages
//!
//! Storages are master records; product storages hold the quantity of a product kept in a
//! storage.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
mod repositories;
pub mod service;

pub use errors::StoragesServiceError;
pub use service::*;
