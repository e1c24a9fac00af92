// Domain modules

pub mod auth;
pub mod movies;
pub mod reviews;
pub mod users;
