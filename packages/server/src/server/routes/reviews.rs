//! `/review` routes. Bodies use camelCase names and also accept the older
//! capitalised ones (`Description`, `User`, `Movie`, `LikeCount`, `DislikeCount`).

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{AuthUser, MovieId, ReviewId, UserId};
use crate::domains::reviews::actions::{
    self,
    input::{optional_count, require_action, require_id, require_text},
};
use crate::domains::reviews::{ReactionSummary, Review, ReviewData, ReviewPatch, ReviewStats};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::require_auth;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "User")]
    pub user_id: Option<String>,
    #[serde(default, alias = "Movie")]
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "LikeCount")]
    pub like_count: Option<i64>,
    #[serde(default, alias = "DislikeCount")]
    pub dislike_count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReviewMessage {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
}

#[derive(Debug, Serialize)]
pub struct ReviewList {
    pub reviews: Vec<ReviewData>,
}

#[derive(Debug, Serialize)]
pub struct SingleReview {
    pub review: ReviewData,
}

fn review_id(raw: &str) -> Result<ReviewId, ApiError> {
    Ok(require_id(Some(raw), "Invalid review ID")?)
}

fn movie_id(raw: &str) -> Result<MovieId, ApiError> {
    Ok(require_id(Some(raw), "Invalid movie ID")?)
}

pub async fn create_review_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewMessage>), ApiError> {
    let Json(body) = body?;
    let description = require_text(
        body.description.as_deref(),
        "Review description is required.",
    )?;
    let author_id: UserId = require_id(body.user_id.as_deref(), "A valid user ID is required.")?;
    let movie_id: MovieId =
        require_id(body.movie_id.as_deref(), "A valid movie ID is required.")?;

    let review =
        actions::create_review(description, author_id, movie_id, &state.server_deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewMessage {
            message: "Review created successfully",
            review: Some(review),
        }),
    ))
}

pub async fn list_reviews_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ReviewList>, ApiError> {
    let reviews = actions::list_reviews(&state.server_deps).await?;
    Ok(Json(ReviewList { reviews }))
}

pub async fn movie_reviews_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(raw_movie_id): Path<String>,
) -> Result<Json<ReviewList>, ApiError> {
    require_auth(auth)?;
    let movie_id = movie_id(&raw_movie_id)?;

    let reviews = actions::reviews_for_movie(movie_id, &state.server_deps).await?;
    Ok(Json(ReviewList { reviews }))
}

pub async fn movie_stats_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(raw_movie_id): Path<String>,
) -> Result<Json<ReviewStats>, ApiError> {
    require_auth(auth)?;
    let movie_id = movie_id(&raw_movie_id)?;

    let stats = actions::movie_stats(movie_id, &state.server_deps).await?;
    Ok(Json(stats))
}

pub async fn get_review_handler(
    Extension(state): Extension<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<SingleReview>, ApiError> {
    let id = review_id(&raw_id)?;
    let review = actions::get_review(id, &state.server_deps).await?;
    Ok(Json(SingleReview { review }))
}

pub async fn react_handler(
    Extension(state): Extension<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ReactRequest>, JsonRejection>,
) -> Result<Json<ReactionSummary>, ApiError> {
    let id = review_id(&raw_id)?;
    let Json(body) = body?;
    let user_id: UserId = require_id(body.user_id.as_deref(), "User ID is required.")?;
    let action = require_action(body.action.as_deref())?;

    let summary = actions::react_to_review(id, user_id, action, &state.server_deps).await?;
    Ok(Json(summary))
}

pub async fn update_review_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewMessage>, ApiError> {
    let actor = require_auth(auth)?;
    let id = review_id(&raw_id)?;
    let Json(body) = body?;

    let patch = ReviewPatch {
        description: body.description,
        like_count: optional_count(body.like_count, "likeCount")?,
        dislike_count: optional_count(body.dislike_count, "dislikeCount")?,
    };
    let review = actions::update_review(id, patch, &actor, &state.server_deps).await?;

    Ok(Json(ReviewMessage {
        message: "Review updated successfully",
        review: Some(review),
    }))
}

pub async fn delete_review_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ReviewMessage>, ApiError> {
    let actor = require_auth(auth)?;
    let id = review_id(&raw_id)?;

    actions::delete_review(id, &actor, &state.server_deps).await?;
    info!(review_id = %id, "Review removed via API");

    Ok(Json(ReviewMessage {
        message: "Review deleted successfully",
        review: None,
    }))
}
