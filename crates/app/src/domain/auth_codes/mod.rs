//! Auth Codes
//!
//! One-time confirmation codes sent to an email address or phone number, rate limited per
//! contact over a rolling day.

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod sender;
pub mod service;

pub use errors::AuthCodesServiceError;
pub use service::*;
