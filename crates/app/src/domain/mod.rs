//! Catalog Domain Concerns

mod active;

pub mod auth_codes;
pub mod categories;
pub mod prices;
pub mod products;
pub mod properties;
pub mod storages;

pub use active::{Active, InvalidActive};
