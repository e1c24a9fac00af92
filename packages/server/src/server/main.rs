// Main entry point for the review API server

use anyhow::{Context, Result};
use review_core::domains::auth::JwtService;
use review_core::kernel::{HttpRatingPredictor, ServerDeps};
use review_core::server::{build_app, AppState};
use review_core::Config;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,review_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting movie review API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(prediction_api = %config.prediction_api_url, "Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let predictor =
        HttpRatingPredictor::new(&config.prediction_api_url, config.prediction_timeout)
            .context("Failed to create prediction client")?;
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let server_deps = ServerDeps::postgres(pool.clone(), Arc::new(predictor), jwt_service);

    let app = build_app(
        AppState::new(server_deps, Some(pool)),
        &config.allowed_origins,
        config.request_timeout,
    );

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
