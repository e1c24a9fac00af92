pub mod review;

pub use review::{NewReview, ReactedReview, Review, ReviewPatch};
