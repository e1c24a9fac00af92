// Movie Reviews - API Core
//
// Backend for the movie review application: review submission with predicted
// ratings, like/dislike reactions, and per-movie rating statistics.
// Architecture follows domain-driven design; external collaborators
// (users, movies, rating prediction) sit behind kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
