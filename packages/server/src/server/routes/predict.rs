use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domains::reviews::actions::predict_rating;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_rating: f64,
}

/// Score review text without storing anything
pub async fn predict_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(body) = body?;
    let text = body.review.unwrap_or_default();

    let predicted_rating = predict_rating(&text, &state.server_deps).await?;
    Ok(Json(PredictResponse { predicted_rating }))
}
