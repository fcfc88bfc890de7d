//! Error envelope shared by every handler.

use std::collections::BTreeMap;

use salvo::{
    http::StatusCode,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};

use catalog_app::validation::{FieldErrors, VALIDATION_FAILED};

const MALFORMED_JSON: &str = "Получен некорректный формат JSON";

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Always `error`
    pub status: String,

    /// Message for the user
    pub message: String,

    /// Field name to validation message, when validation failed
    pub errors: Option<BTreeMap<String, String>>,
}

/// A failed request, rendered as [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub(crate) fn malformed_json() -> Self {
        Self::bad_request(MALFORMED_JSON)
    }

    pub(crate) fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: VALIDATION_FAILED.to_owned(),
            errors: Some(errors),
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(error: ApiError) -> Self {
        Self {
            status: "error".to_owned(),
            message: error.message,
            errors: error.errors.map(|errors| {
                errors
                    .iter()
                    .map(|(field, message)| (field.to_owned(), message.to_owned()))
                    .collect()
            }),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse::from(self)));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}
