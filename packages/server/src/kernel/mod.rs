//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;

pub use deps::{CachePolicy, ServerDeps};
pub use test_dependencies::{TestDependencies, TEST_API_KEY};
