//! Response shapes for reviews enriched with author and movie display fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{MovieId, ReviewId, UserId};
use crate::domains::movies::Movie;
use crate::domains::reviews::machines::ReactionState;
use crate::domains::reviews::models::Review;
use crate::domains::users::UserProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub name: String,
    pub image: Option<String>,
}

impl From<Movie> for MovieSummary {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            name: movie.name,
            image: movie.image,
        }
    }
}

/// Review as returned by list/detail endpoints
///
/// `author`/`movie` are `None` when the referenced record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    pub id: ReviewId,
    pub description: String,
    pub rating: f64,
    pub like_count: i32,
    pub dislike_count: i32,
    pub liked_users: Vec<UserId>,
    pub disliked_users: Vec<UserId>,
    pub author_id: UserId,
    pub movie_id: MovieId,
    pub author: Option<UserProfile>,
    pub movie: Option<MovieSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewData {
    pub fn new(review: Review, author: Option<UserProfile>, movie: Option<MovieSummary>) -> Self {
        Self {
            id: review.id,
            description: review.description,
            rating: review.rating,
            like_count: review.like_count,
            dislike_count: review.dislike_count,
            liked_users: review.liked_users,
            disliked_users: review.disliked_users,
            author_id: review.author_id,
            movie_id: review.movie_id,
            author,
            movie,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Authoritative counters after a reaction; clients reconcile to this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummary {
    pub success: bool,
    pub like_count: i32,
    pub dislike_count: i32,
    /// The reacting user's state after the call
    pub reaction: ReactionState,
}
