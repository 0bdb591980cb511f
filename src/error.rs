use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid match id `{0}`")]
    InvalidId(String),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("match not found")]
    NotFound,

    #[error("no such route")]
    UnknownRoute,

    /// Carries the value of the `Allow` header.
    #[error("method not allowed")]
    MethodNotAllowed(&'static str),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::UnknownRoute => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Storage(e) => {
                tracing::error!("storage failure: {:#}", e);
                (status, "storage error").into_response()
            }
            AppError::MethodNotAllowed(allow) => {
                (status, [(header::ALLOW, allow)], "method not allowed").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
