use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{BaseRatingPredictor, PredictionError};

/// Client for the hosted review-rating model
///
/// POSTs `{"review": text}` and expects `{"predicted_rating": <number>}`.
pub struct HttpRatingPredictor {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    review: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predicted_rating: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PredictErrorBody {
    error: Option<String>,
}

impl HttpRatingPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build prediction HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Accept only a finite JSON number as the score
fn parse_score(body: &str) -> std::result::Result<f64, PredictionError> {
    let parsed: PredictResponse =
        serde_json::from_str(body).map_err(|_| PredictionError::Malformed)?;

    parsed
        .predicted_rating
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|score| score.is_finite())
        .ok_or(PredictionError::Malformed)
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<PredictErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[async_trait]
impl BaseRatingPredictor for HttpRatingPredictor {
    async fn predict(&self, text: &str) -> std::result::Result<f64, PredictionError> {
        debug!(endpoint = %self.endpoint, chars = text.len(), "Requesting rating prediction");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { review: text })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Prediction request failed");
                PredictionError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!(%status, body = %body, "Prediction API returned an error");
            return Err(PredictionError::Upstream(upstream_message(&body)));
        }

        let score = parse_score(&body)?;
        info!(score, "Rating predicted");
        Ok(score)
    }
}
