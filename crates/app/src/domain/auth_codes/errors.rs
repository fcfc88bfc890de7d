//! Auth code service errors.

use thiserror::Error;

use crate::{
    database::StoreError, domain::auth_codes::sender::SendError, validation::FieldErrors,
};

#[derive(Debug, Error)]
pub enum AuthCodesServiceError {
    #[error("ошибка в валидации поля")]
    Validation(#[from] FieldErrors),

    #[error("превышено количество попыток")]
    TooManyAttempts,

    #[error("произошла ошибка при отправке кода")]
    Send(#[from] SendError),

    #[error("произошла ошибка при сохранении кода")]
    Store(#[source] StoreError),
}

impl From<sqlx::Error> for AuthCodesServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Store(error.into())
    }
}
