//! Review operations. Each takes typed input plus `ServerDeps`; raw request
//! values go through the `input` helpers first.

pub mod create_review;
pub mod input;
pub mod manage;
pub mod predict;
pub mod queries;
pub mod react;

pub use create_review::create_review;
pub use manage::{delete_review, update_review};
pub use predict::predict_rating;
pub use queries::{get_review, list_reviews, movie_stats, reviews_for_movie};
pub use react::react_to_review;
