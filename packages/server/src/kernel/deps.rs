//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by the menu
//! service and the HTTP layer. Every external service sits behind a trait from
//! the extraction library so tests can swap in mocks.

use std::sync::Arc;

use menu_extraction::{
    HolidayCalendar, MenuCache, MenuExtractor, MenuPipeline, PageFetcher, PipelineConfig,
};

/// Cache windows for serving and purging menus.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Max age of an entry that may still be served
    pub freshness: chrono::Duration,
    /// Max age before an entry is removed by the retention sweep
    pub retention: chrono::Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            freshness: chrono::Duration::hours(6),
            retention: chrono::Duration::hours(24),
        }
    }
}

/// Server dependencies accessible to the menu service and routes
#[derive(Clone)]
pub struct ServerDeps {
    pub cache: Arc<dyn MenuCache>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub extractor: Arc<dyn MenuExtractor>,
    pub holidays: Arc<dyn HolidayCalendar>,
    pub pipeline_config: PipelineConfig,
    pub cache_policy: CachePolicy,
    /// Shared secret callers present as a bearer token
    pub api_secret_key: String,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        cache: Arc<dyn MenuCache>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn MenuExtractor>,
        holidays: Arc<dyn HolidayCalendar>,
        api_secret_key: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            extractor,
            holidays,
            pipeline_config: PipelineConfig::default(),
            cache_policy: CachePolicy::default(),
            api_secret_key: api_secret_key.into(),
        }
    }

    /// Set the fetch and extraction timeouts.
    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline_config = config;
        self
    }

    /// Set the freshness and retention windows.
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Build the extraction pipeline from these dependencies.
    pub fn pipeline(&self) -> MenuPipeline {
        MenuPipeline::new(
            self.fetcher.clone(),
            self.extractor.clone(),
            self.holidays.clone(),
        )
        .with_config(self.pipeline_config)
    }
}
