//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    create_review_handler, delete_review_handler, get_review_handler, health_handler,
    list_reviews_handler, movie_reviews_handler, movie_stats_handler, predict_handler,
    react_handler, update_review_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub server_deps: Arc<ServerDeps>,
    /// Absent when running on in-memory dependencies
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(server_deps: ServerDeps, db_pool: Option<PgPool>) -> Self {
        Self {
            server_deps: Arc::new(server_deps),
            db_pool,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String], request_timeout: Duration) -> Router {
    let jwt_service = state.server_deps.jwt_service.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route(
            "/review",
            post(create_review_handler).get(list_reviews_handler),
        )
        .route("/review/Movie/:movie_id", get(movie_reviews_handler))
        .route("/review/Movie/:movie_id/stats", get(movie_stats_handler))
        .route(
            "/review/:id",
            get(get_review_handler)
                .patch(update_review_handler)
                .delete(delete_review_handler),
        )
        .route("/review/:id/react", post(react_handler))
        // Layers run bottom-up: trace and CORS see every request first
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
