// Shared integration test support
pub mod harness;

pub use harness::*;
