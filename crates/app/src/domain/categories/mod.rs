//! Categories
//!
//! Categories form a tree through a nullable parent UUID. Unlike the other catalog masters
//! they are deleted explicitly rather than by omission from an upsert.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
mod repository;
pub mod service;
mod tree;

pub use errors::CategoriesServiceError;
pub use service::*;
