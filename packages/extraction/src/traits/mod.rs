//! Core trait abstractions for the extraction library.
//!
//! These traits are the seams between the pipeline and the outside world:
//! page fetching, model calls, the holiday calendar, and cache storage.

pub mod ai;
pub mod calendar;
pub mod fetcher;
pub mod store;
