//! Movies domain - read-only view of the movie catalog
//!
//! Used to check that a reviewed movie exists and to attach its display
//! fields to reviews.

pub mod models;

pub use models::movie::Movie;
