//! JSON body parsing with the envelope's malformed JSON error.

use salvo::Request;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

pub(crate) trait RequestExt {
    async fn json_or_400<T: DeserializeOwned>(&mut self) -> Result<T, ApiError>;
}

impl RequestExt for Request {
    async fn json_or_400<T: DeserializeOwned>(&mut self) -> Result<T, ApiError> {
        self.parse_json::<T>().await.map_err(|error| {
            debug!("rejected request body: {error}");

            ApiError::malformed_json()
        })
    }
}
