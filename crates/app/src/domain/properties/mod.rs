//! Properties
//!
//! Properties are dynamic product attributes; property values are the allowed values of a
//! property, addressed by a key unique within the property.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
mod repositories;
pub mod service;

pub use errors::PropertiesServiceError;
pub use service::*;
