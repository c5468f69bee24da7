//! Daily Menu Extraction Library
//!
//! Turns a restaurant web page into a structured menu for one day, and caches
//! the result per (URL, day).
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use menu_extraction::{CzechHolidays, HttpFetcher, MenuPipeline, PipelineOutcome};
//! use menu_extraction::testing::MockExtractor;
//!
//! let pipeline = MenuPipeline::new(
//!     Arc::new(HttpFetcher::new()?),
//!     Arc::new(MockExtractor::new().with_output(r#"{"menu_items": []}"#)),
//!     Arc::new(CzechHolidays::new()),
//! );
//!
//! match pipeline.run("https://www.spojka-karlin.cz/menu", today).await {
//!     PipelineOutcome::Done(menu) => println!("{} items", menu.menu_items.len()),
//!     other => println!("no menu: {}", other.label()),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Adapter seams (PageFetcher, MenuExtractor, HolidayCalendar, MenuCache)
//! - [`types`] - Menu documents, cache entries, fetched pages
//! - [`pipeline`] - Fetch, validate, extract, post-process
//! - [`stores`] - Cache backends (MemoryStore, SqliteStore)
//! - [`ingestors`] - Page fetchers (HttpFetcher, MockFetcher)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod holidays;
pub mod html;
pub mod ingestors;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{CrawlError, CrawlResult, ExtractionError, Result};
pub use holidays::CzechHolidays;
pub use ingestors::{HttpFetcher, MockFetcher};
pub use pipeline::{MenuPipeline, PipelineConfig, PipelineOutcome, INVALID_JSON_ERROR};
pub use stores::MemoryStore;
pub use traits::{
    ai::{ExtractionRequest, MenuExtractor},
    calendar::HolidayCalendar,
    fetcher::PageFetcher,
    store::MenuCache,
};
pub use types::{
    entry::CacheEntry,
    menu::{DegradedMenu, MenuDocument, MenuItem, ALLERGENS_UNKNOWN},
    page::FetchedPage,
};

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

#[cfg(feature = "openai")]
pub use ai::OpenAIExtractor;
