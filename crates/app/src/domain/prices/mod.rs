//! Prices
//!
//! Price types are master records; product prices associate a product with a price type.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
mod repositories;
pub mod service;

pub use errors::PricesServiceError;
pub use service::*;
