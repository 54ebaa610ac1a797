use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// Errors a handler can bail out with.
///
/// Field-level validation errors are not part of this type: they are rendered
/// back into the form with a 200. Everything here ends the request with a
/// plain text error response.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("CSRF verification failed. Request aborted.")]
    Forbidden,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Forbidden => {
                tracing::warn!("{}", self);
                (self.status_code(), self.to_string()).into_response()
            }
            Self::Unexpected(ref e) => {
                tracing::error!(error.cause_chain = ?e, error.message = %e, "unexpected error");
                (self.status_code(), "Unexpected error").into_response()
            }
        }
    }
}
