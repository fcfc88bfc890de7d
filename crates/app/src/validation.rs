//! Request validation.
//!
//! Incoming payloads derive [`validator::Validate`]; failures are flattened into a map of
//! field name to a human readable message.

use std::{borrow::Cow, collections::BTreeMap};

use serde::Serialize;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Message shown alongside any field error map.
pub const VALIDATION_FAILED: &str = "ошибка в валидации поля";

/// Field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("ошибка в валидации поля")]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// A single field error with a preformatted message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(BTreeMap::from([(field.to_owned(), message.into())]))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        flatten(&errors, &mut fields);
        Self(fields)
    }
}

fn flatten(errors: &ValidationErrors, into: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    into.entry(field.to_string())
                        .or_insert_with(|| message(field, first));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(nested, into),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    flatten(nested, into);
                }
            }
        }
    }
}

fn message(field: &str, error: &ValidationError) -> String {
    let field = field.to_lowercase();

    match &*error.code {
        "required" => format!("Поле {field} обязательно для заполнения"),
        "oneof" => format!("Поле {field} должно быть Y или N"),
        "gte" => format!("Поле {field} должно быть больше или равно 0"),
        _ => match &error.message {
            Some(text) => format!("Поле {field} {text}"),
            None => format!("Поле {field} заполнено некорректно"),
        },
    }
}

/// Validate one level of a payload.
///
/// # Errors
///
/// Returns the flattened field errors when any rule fails.
pub fn check<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    value.validate().map_err(FieldErrors::from)
}

/// Validate every item of a nested list, stopping at the first invalid one.
///
/// # Errors
///
/// Returns the field errors of the first invalid item.
pub fn check_each<'a, T, I>(items: I) -> Result<(), FieldErrors>
where
    T: Validate + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().try_for_each(check)
}

/// Unwrap a field that the derived rules already marked as required.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, FieldErrors> {
    value.ok_or_else(|| {
        FieldErrors::single(field, format!("Поле {field} обязательно для заполнения"))
    })
}

/// Custom rule for the `Y`/`N` flag.
pub(crate) fn one_of_active(value: &str) -> Result<(), ValidationError> {
    if matches!(value, "Y" | "N") {
        Ok(())
    } else {
        Err(ValidationError::new("oneof").with_message(Cow::Borrowed("должно быть Y или N")))
    }
}

/// Category flavour of [`one_of_active`]: categories list the allowed values instead.
pub(crate) fn one_of_listed_active(value: &str) -> Result<(), ValidationError> {
    if matches!(value, "Y" | "N") {
        Ok(())
    } else {
        Err(ValidationError::new("oneof_listed")
            .with_message(Cow::Borrowed("может быть одним из: Y или N")))
    }
}
