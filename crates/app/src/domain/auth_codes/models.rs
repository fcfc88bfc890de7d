//! Auth Code Models

use std::fmt;

use jiff::Timestamp;

/// Where a code is delivered. Email wins when a request carries both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl Contact {
    pub(crate) fn email(&self) -> Option<&str> {
        match self {
            Self::Email(email) => Some(email),
            Self::Phone(_) => None,
        }
    }

    pub(crate) fn phone(&self) -> Option<&str> {
        match self {
            Self::Phone(phone) => Some(phone),
            Self::Email(_) => None,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "email:{email}"),
            Self::Phone(phone) => write!(f, "phone:{phone}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCodeRecord {
    pub id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub code: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
}
