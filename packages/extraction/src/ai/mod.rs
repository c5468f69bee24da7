//! Model-backed implementations of the [`MenuExtractor`](crate::traits::ai::MenuExtractor) trait.

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAIExtractor;
