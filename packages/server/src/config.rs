use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Default scoring endpoint of the hosted review-rating model.
pub const DEFAULT_PREDICTION_API_URL: &str = "https://Milan63-lstm-api.hf.space/predict";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub prediction_api_url: String,
    pub prediction_timeout: Duration,
    pub request_timeout: Duration,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let prediction_api_url = env::var("PREDICTION_API_URL")
            .unwrap_or_else(|_| DEFAULT_PREDICTION_API_URL.to_string());
        if !prediction_api_url.starts_with("http://") && !prediction_api_url.starts_with("https://")
        {
            bail!("PREDICTION_API_URL must start with http:// or https://");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "movie-reviews".to_string()),
            prediction_api_url,
            prediction_timeout: seconds_var("PREDICTION_TIMEOUT_SECS", 30)?,
            request_timeout: seconds_var("REQUEST_TIMEOUT_SECS", 60)?,
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

fn seconds_var(key: &str, default: u64) -> Result<Duration> {
    let secs = match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds"))?,
        Err(_) => default,
    };
    Ok(Duration::from_secs(secs))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_skips_blanks() {
        let origins = parse_origins(" http://localhost:5173 , ,https://reviews.example.com");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "https://reviews.example.com"]
        );
    }

    #[test]
    fn parse_origins_empty_means_any() {
        assert!(parse_origins("").is_empty());
    }
}
