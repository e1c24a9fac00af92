//! Authorization primitives.
//!
//! Identity resolution (bearer token → `AuthUser`) happens in the HTTP
//! middleware; domain code only asks questions of the resolved user:
//!
//! ```rust
//! use review_core::common::{AuthUser, Role, UserId};
//!
//! let admin = AuthUser::new(UserId::new(), Role::Admin);
//! assert!(admin.require_admin().is_ok());
//! ```

mod errors;
mod user;

pub use errors::AuthError;
pub use user::{AuthUser, Role};
