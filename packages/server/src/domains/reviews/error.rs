use thiserror::Error;

use super::machines::UnknownAction;
use crate::common::AuthError;
use crate::kernel::PredictionError;

/// Failures surfaced by review operations. Messages are shown to callers
/// verbatim, so they stay stable and free of storage detail.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PredictionUnavailable(String),

    #[error("{message}")]
    StorageFailure {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ReviewError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Only an answer from the prediction API is shown to callers; transport
    /// and parse failures get `fallback`.
    pub fn prediction(err: &PredictionError, fallback: &str) -> Self {
        match err {
            PredictionError::Upstream(message) => {
                Self::PredictionUnavailable(format!("Prediction API Error: {message}"))
            }
            PredictionError::Transport(_) | PredictionError::Malformed => {
                Self::PredictionUnavailable(fallback.to_string())
            }
        }
    }

    /// `map_err` adapter for store calls: `.map_err(ReviewError::storage("..."))?`
    pub fn storage(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::StorageFailure { message, source }
    }
}

impl From<UnknownAction> for ReviewError {
    fn from(err: UnknownAction) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

pub type ReviewResult<T> = std::result::Result<T, ReviewError>;
