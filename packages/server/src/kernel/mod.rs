//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod prediction_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PostgresMovieCatalog, PostgresReviewStore, PostgresUserDirectory, ServerDeps};
pub use prediction_client::HttpRatingPredictor;
pub use test_dependencies::TestDependencies;
pub use traits::*;
