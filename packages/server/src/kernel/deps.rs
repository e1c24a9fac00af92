//! Server dependencies for review actions (using traits for testability)
//!
//! `ServerDeps` is the central container handed to every action. Production
//! wires the Postgres adapters below; tests wire `TestDependencies`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::{MovieId, ReviewId, UserId};
use crate::domains::auth::JwtService;
use crate::domains::movies::Movie;
use crate::domains::reviews::machines::ReactionAction;
use crate::domains::reviews::models::{NewReview, ReactedReview, Review, ReviewPatch};
use crate::domains::users::{User, UserProfile};
use crate::kernel::{BaseMovieCatalog, BaseRatingPredictor, BaseReviewStore, BaseUserDirectory};

// =============================================================================
// Postgres adapters (implement the Base* traits over the domain models)
// =============================================================================

pub struct PostgresReviewStore(pub PgPool);

#[async_trait]
impl BaseReviewStore for PostgresReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review> {
        Review::insert(review, &self.0).await
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>> {
        Review::find_by_id(id, &self.0).await
    }

    async fn find_all(&self) -> Result<Vec<Review>> {
        Review::find_all(&self.0).await
    }

    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Review>> {
        Review::find_by_movie(movie_id, &self.0).await
    }

    async fn apply_reaction(
        &self,
        id: ReviewId,
        user_id: UserId,
        action: ReactionAction,
    ) -> Result<Option<ReactedReview>> {
        Review::apply_reaction(id, user_id, action, &self.0).await
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Option<Review>> {
        Review::update_fields(id, patch, &self.0).await
    }

    async fn delete(&self, id: ReviewId) -> Result<bool> {
        Review::delete(id, &self.0).await
    }
}

pub struct PostgresUserDirectory(pub PgPool);

#[async_trait]
impl BaseUserDirectory for PostgresUserDirectory {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(User::find_by_id(id, &self.0).await?.map(UserProfile::from))
    }

    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<UserProfile>> {
        UserProfile::find_by_ids(ids, &self.0).await
    }
}

pub struct PostgresMovieCatalog(pub PgPool);

#[async_trait]
impl BaseMovieCatalog for PostgresMovieCatalog {
    async fn find_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        Movie::find_by_id(id, &self.0).await
    }

    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        Movie::find_by_ids(ids, &self.0).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    pub reviews: Arc<dyn BaseReviewStore>,
    pub users: Arc<dyn BaseUserDirectory>,
    pub movies: Arc<dyn BaseMovieCatalog>,
    pub predictor: Arc<dyn BaseRatingPredictor>,
    /// JWT service for bearer token verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        reviews: Arc<dyn BaseReviewStore>,
        users: Arc<dyn BaseUserDirectory>,
        movies: Arc<dyn BaseMovieCatalog>,
        predictor: Arc<dyn BaseRatingPredictor>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            reviews,
            users,
            movies,
            predictor,
            jwt_service,
        }
    }

    /// Production wiring: every store backed by the same pool
    pub fn postgres(
        pool: PgPool,
        predictor: Arc<dyn BaseRatingPredictor>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self::new(
            Arc::new(PostgresReviewStore(pool.clone())),
            Arc::new(PostgresUserDirectory(pool.clone())),
            Arc::new(PostgresMovieCatalog(pool)),
            predictor,
            jwt_service,
        )
    }
}
