//! The `Y`/`N` activity flag.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

use crate::validation::FieldErrors;

/// Whether a record is active. Stored verbatim as `Y` or `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Active {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

#[derive(Debug, Error)]
#[error("invalid active flag: {0:?}")]
pub struct InvalidActive(pub String);

impl Active {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }

    /// Decode a `CHAR(1)` column.
    pub(crate) fn try_get(row: &PgRow, column: &str) -> sqlx::Result<Self> {
        let raw: String = row.try_get(column)?;

        raw.parse()
            .map_err(|error: InvalidActive| sqlx::Error::ColumnDecode {
                index: column.to_owned(),
                source: Box::new(error),
            })
    }

    /// Parse a request field, reporting failures against `field`.
    pub(crate) fn parse_field(value: &str, field: &str) -> Result<Self, FieldErrors> {
        value
            .parse()
            .map_err(|error: InvalidActive| {
                FieldErrors::single(field, error.field_message(field, "должно быть Y или N"))
            })
    }

    /// Like [`Active::parse_field`], with the wording category payloads use.
    pub(crate) fn parse_listed_field(value: &str, field: &str) -> Result<Self, FieldErrors> {
        value.parse().map_err(|error: InvalidActive| {
            FieldErrors::single(field, error.field_message(field, "может быть одним из: Y или N"))
        })
    }
}

impl InvalidActive {
    fn field_message(&self, field: &str, rule: &str) -> String {
        if self.0.is_empty() {
            format!("Поле {field} обязательно для заполнения")
        } else {
            format!("Поле {field} {rule}")
        }
    }
}

impl FromStr for Active {
    type Err = InvalidActive;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim_end() {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            other => Err(InvalidActive(other.to_owned())),
        }
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
