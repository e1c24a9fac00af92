use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::{MovieId, ReviewId, UserId};
use crate::domains::reviews::machines::{
    state_in, ReactionAction, ReactionLedger, ReactionState, Transition,
};

/// Neutral rating used when a row is written without a prediction.
pub const DEFAULT_RATING: f64 = 2.0;

/// Upper bound of the rating scale; predictions are clamped into `[0, MAX_RATING]`.
pub const MAX_RATING: f64 = 5.0;

/// Review model - SQL persistence layer
///
/// The reaction sets live on the row itself so one row lock covers a whole
/// like/dislike transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub description: String,
    pub rating: f64,
    pub like_count: i32,
    pub dislike_count: i32,
    pub liked_users: Vec<UserId>,
    pub disliked_users: Vec<UserId>,
    pub author_id: UserId,
    pub movie_id: MovieId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Creation / update parameter structs
// =============================================================================

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewReview {
    #[builder(setter(into))]
    pub description: String,
    #[builder(default = DEFAULT_RATING)]
    pub rating: f64,
    pub author_id: UserId,
    pub movie_id: MovieId,
}

/// Administrative overwrite; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPatch {
    pub description: Option<String>,
    pub like_count: Option<i32>,
    pub dislike_count: Option<i32>,
}

/// A review after a reaction was applied, with the reacting user's transition
#[derive(Debug, Clone)]
pub struct ReactedReview {
    pub review: Review,
    pub transition: Transition,
}

impl ReactedReview {
    pub fn state(&self) -> ReactionState {
        self.transition.to
    }
}

// =============================================================================
// In-process state changes (shared by every store)
// =============================================================================

impl Review {
    pub fn new(new: NewReview) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::new(),
            description: new.description,
            rating: new.rating,
            like_count: 0,
            dislike_count: 0,
            liked_users: Vec::new(),
            disliked_users: Vec::new(),
            author_id: new.author_id,
            movie_id: new.movie_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reaction_of(&self, user_id: UserId) -> ReactionState {
        state_in(&self.liked_users, &self.disliked_users, user_id)
    }

    /// Run one reaction through the state machine. Callers must hold the
    /// review's lock for the duration.
    pub fn react(&mut self, user_id: UserId, action: ReactionAction) -> Transition {
        let mut ledger = ReactionLedger {
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            liked_users: std::mem::take(&mut self.liked_users),
            disliked_users: std::mem::take(&mut self.disliked_users),
        };
        let transition = ledger.apply(user_id, action);

        self.like_count = ledger.like_count;
        self.dislike_count = ledger.dislike_count;
        self.liked_users = ledger.liked_users;
        self.disliked_users = ledger.disliked_users;
        self.updated_at = Utc::now();

        transition
    }

    /// Direct field overwrite; bypasses the reaction machine.
    pub fn apply_patch(&mut self, patch: &ReviewPatch) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(like_count) = patch.like_count {
            self.like_count = like_count;
        }
        if let Some(dislike_count) = patch.dislike_count {
            self.dislike_count = dislike_count;
        }
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// SQL Queries
// =============================================================================

impl Review {
    pub async fn insert(new: NewReview, pool: &PgPool) -> Result<Self> {
        let review = Self::new(new);
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO reviews (
                id, description, rating, author_id, movie_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(review.id)
        .bind(&review.description)
        .bind(review.rating)
        .bind(review.author_id)
        .bind(review.movie_id)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ReviewId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM reviews ORDER BY created_at, id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_movie(movie_id: MovieId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM reviews WHERE movie_id = $1 ORDER BY created_at, id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply a reaction atomically.
    ///
    /// The row is locked with `FOR UPDATE` for the whole read-modify-write, so
    /// concurrent reactions on one review serialize. Returns `None` if the
    /// review does not exist. Dropping the future before commit rolls the
    /// transaction back.
    pub async fn apply_reaction(
        id: ReviewId,
        user_id: UserId,
        action: ReactionAction,
        pool: &PgPool,
    ) -> Result<Option<ReactedReview>> {
        let mut tx = pool.begin().await?;

        let Some(mut review) =
            sqlx::query_as::<_, Self>("SELECT * FROM reviews WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        let transition = review.react(user_id, action);

        let review = sqlx::query_as::<_, Self>(
            r#"
            UPDATE reviews
            SET like_count = $2,
                dislike_count = $3,
                liked_users = $4,
                disliked_users = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(review.like_count)
        .bind(review.dislike_count)
        .bind(&review.liked_users)
        .bind(&review.disliked_users)
        .bind(review.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(ReactedReview { review, transition }))
    }

    pub async fn update_fields(
        id: ReviewId,
        patch: &ReviewPatch,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE reviews
            SET description = COALESCE($2, description),
                like_count = COALESCE($3, like_count),
                dislike_count = COALESCE($4, dislike_count),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.description.as_deref())
        .bind(patch.like_count)
        .bind(patch.dislike_count)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns `true` if a row was deleted
    pub async fn delete(id: ReviewId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
