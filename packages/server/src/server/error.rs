//! JSON error responses: every failure is `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::AuthError;
use crate::domains::reviews::ReviewError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Body could not be decoded as JSON of the expected shape
    #[error("{0}")]
    BadRequest(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Review(ReviewError::Auth(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Review(err) => match err {
                ReviewError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ReviewError::NotFound(_) => StatusCode::NOT_FOUND,
                ReviewError::PredictionUnavailable(_) | ReviewError::StorageFailure { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ReviewError::Auth(AuthError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
                ReviewError::Auth(AuthError::AdminRequired) => StatusCode::FORBIDDEN,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Review(ReviewError::StorageFailure { message, source }) = &self {
            error!(error = ?source, "{message}");
        }

        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
