// HTTP routes
pub mod health;
pub mod predict;
pub mod reviews;

pub use health::*;
pub use predict::*;
pub use reviews::*;
