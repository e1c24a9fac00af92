// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Review rules (reaction transitions, validation, stats) live in the reviews
// domain and are called by implementations where atomicity requires it.
//
// Naming convention: Base* for trait names (e.g., BaseRatingPredictor)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::common::{MovieId, ReviewId, UserId};
use crate::domains::movies::Movie;
use crate::domains::reviews::machines::ReactionAction;
use crate::domains::reviews::models::{NewReview, ReactedReview, Review, ReviewPatch};
use crate::domains::users::UserProfile;

// =============================================================================
// Rating Prediction Trait (Infrastructure - hosted ML model)
// =============================================================================

/// Why a prediction could not be obtained
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Failed to get a valid prediction.")]
    Malformed,
}

#[async_trait]
pub trait BaseRatingPredictor: Send + Sync {
    /// Score review text; higher is better
    async fn predict(&self, text: &str) -> std::result::Result<f64, PredictionError>;
}

// =============================================================================
// User Directory Trait (Infrastructure - account service)
// =============================================================================

#[async_trait]
pub trait BaseUserDirectory: Send + Sync {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>>;

    /// Unknown ids are omitted from the result
    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<UserProfile>>;
}

// =============================================================================
// Movie Catalog Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseMovieCatalog: Send + Sync {
    async fn find_movie(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Unknown ids are omitted from the result
    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Movie>>;
}

// =============================================================================
// Review Store Trait (Infrastructure - persistence)
// =============================================================================

/// Review persistence. Every mutating method is atomic per review: either the
/// whole change is stored or nothing is.
#[async_trait]
pub trait BaseReviewStore: Send + Sync {
    async fn insert(&self, review: NewReview) -> Result<Review>;

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>>;

    async fn find_all(&self) -> Result<Vec<Review>>;

    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Review>>;

    /// Run a reaction through `Review::react` under a per-review lock.
    /// Returns `None` when the review does not exist.
    async fn apply_reaction(
        &self,
        id: ReviewId,
        user_id: UserId,
        action: ReactionAction,
    ) -> Result<Option<ReactedReview>>;

    /// Returns `None` when the review does not exist
    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Option<Review>>;

    /// Returns `true` if a review was deleted
    async fn delete(&self, id: ReviewId) -> Result<bool>;
}
