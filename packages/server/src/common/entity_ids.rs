//! Typed ID definitions for the review domain and its collaborators.

pub use super::id::Id;

/// Marker type for User entities (review authors and reactors).
pub struct User;

/// Marker type for Movie entities.
pub struct Movie;

/// Marker type for Review entities.
pub struct Review;

pub type UserId = Id<User>;

pub type MovieId = Id<Movie>;

pub type ReviewId = Id<Review>;
