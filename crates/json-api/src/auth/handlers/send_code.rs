//! Send Code Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use catalog_app::domain::auth_codes::data::SendCode;

use crate::{auth::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Send Code Request
///
/// At least one contact is required; email is used when both are given.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct SendCodeRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<SendCodeRequest> for SendCode {
    fn from(request: SendCodeRequest) -> Self {
        SendCode {
            email: request.email,
            phone: request.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SendCodeResponse {
    pub message: String,
}

/// Send Code Handler
///
/// Sends a one-time confirmation code to the given email address or phone number.
#[endpoint(
    tags("auth"),
    summary = "Send Confirmation Code",
    responses(
        (status_code = StatusCode::CREATED, description = "Code sent"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Daily code limit reached"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SendCodeResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: SendCodeRequest = req.json_or_400().await?;

    state
        .app
        .auth_codes
        .send_code(body.into())
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SendCodeResponse {
        message: "код отправлен".to_owned(),
    }))
}
