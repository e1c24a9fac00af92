//! Create review action

use tracing::{info, warn};

use crate::common::{MovieId, UserId};
use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::domains::reviews::models::review::MAX_RATING;
use crate::domains::reviews::models::{NewReview, Review};
use crate::kernel::ServerDeps;

const CREATE_FAILED: &str = "Creating review failed, please try again.";

/// Create a review with a rating predicted from its text.
///
/// Author and movie must exist. If the prediction fails or is not a finite
/// number nothing is stored and the failure is returned as
/// `PredictionUnavailable`; there is no retry.
pub async fn create_review(
    description: &str,
    author_id: UserId,
    movie_id: MovieId,
    deps: &ServerDeps,
) -> ReviewResult<Review> {
    if description.trim().is_empty() {
        return Err(ReviewError::invalid("Review description is required."));
    }

    deps.users
        .find_profile(author_id)
        .await
        .map_err(ReviewError::storage(CREATE_FAILED))?
        .ok_or_else(|| ReviewError::not_found("User not found."))?;

    deps.movies
        .find_movie(movie_id)
        .await
        .map_err(ReviewError::storage(CREATE_FAILED))?
        .ok_or_else(|| ReviewError::not_found("Movie not found."))?;

    let predicted = deps.predictor.predict(description).await.map_err(|e| {
        warn!(%author_id, %movie_id, error = ?e, "Rating prediction failed, review not created");
        ReviewError::prediction(&e, CREATE_FAILED)
    })?;
    if !predicted.is_finite() {
        warn!(%author_id, %movie_id, predicted, "Non-finite rating prediction, review not created");
        return Err(ReviewError::PredictionUnavailable(CREATE_FAILED.to_string()));
    }
    let rating = predicted.clamp(0.0, MAX_RATING);

    let review = deps
        .reviews
        .insert(
            NewReview::builder()
                .description(description)
                .rating(rating)
                .author_id(author_id)
                .movie_id(movie_id)
                .build(),
        )
        .await
        .map_err(ReviewError::storage(CREATE_FAILED))?;

    info!(review_id = %review.id, %movie_id, rating, "Review created");
    Ok(review)
}
