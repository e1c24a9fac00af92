//! Reviews domain - review submission, like/dislike reactions, and rating
//! statistics
//!
//! Architecture:
//!   HTTP route → actions (validation, collaborators) → BaseReviewStore
//!   BaseReviewStore → Review::react → machines::ReactionLedger (under lock)
//!
//! Responsibilities:
//! - Creating reviews with a rating from the prediction service
//! - The per-user like/dislike state machine and its counters
//! - Per-movie aggregate statistics, recomputed on every read

pub mod actions;
pub mod data;
pub mod error;
pub mod machines;
pub mod models;
pub mod stats;

pub use data::{MovieSummary, ReactionSummary, ReviewData};
pub use error::{ReviewError, ReviewResult};
pub use machines::{ReactionAction, ReactionState};
pub use models::{NewReview, Review, ReviewPatch};
pub use stats::{compute_stats, RatingDistribution, ReviewStats};
