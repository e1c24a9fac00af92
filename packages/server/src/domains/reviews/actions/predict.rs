//! Rating preview: score text without storing anything

use tracing::warn;

use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::kernel::ServerDeps;

const PREDICT_FAILED: &str = "Prediction failed, please try again.";

pub async fn predict_rating(text: &str, deps: &ServerDeps) -> ReviewResult<f64> {
    if text.trim().is_empty() {
        return Err(ReviewError::invalid("Review text is required!"));
    }

    let predicted = deps.predictor.predict(text).await.map_err(|e| {
        warn!(error = ?e, "Rating preview failed");
        ReviewError::prediction(&e, PREDICT_FAILED)
    })?;
    if !predicted.is_finite() {
        return Err(ReviewError::PredictionUnavailable(PREDICT_FAILED.to_string()));
    }
    Ok(predicted)
}
