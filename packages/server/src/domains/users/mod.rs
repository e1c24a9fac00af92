//! Users domain - read-only view of the account service's users
//!
//! Reviews reference users as authors and reactors; this domain only
//! resolves ids to display fields.

pub mod models;

pub use models::user::{User, UserProfile};
