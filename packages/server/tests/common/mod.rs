// Common test utilities
pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
