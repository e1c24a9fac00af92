//! Auth domain - bearer token verification
//!
//! Tokens are issued by the account service; this service only verifies them
//! and maps the claims onto an `AuthUser`.

pub mod jwt;

pub use jwt::{Claims, JwtService};
