// TestDependencies - mock implementations for testing
//
// Bundles the extraction library's mocks with an in-memory cache and turns
// them into ServerDeps. Tests keep their own handle on each mock to assert
// on recorded calls.

use std::sync::Arc;

use menu_extraction::testing::{FixedHolidays, MockExtractor, MockFetcher};
use menu_extraction::{MemoryStore, MenuCache, PipelineConfig};

use super::{CachePolicy, ServerDeps};

/// Bearer token accepted by servers built from TestDependencies.
pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Clone)]
pub struct TestDependencies {
    pub cache: Arc<MemoryStore>,
    pub fetcher: MockFetcher,
    pub extractor: MockExtractor,
    pub holidays: FixedHolidays,
    pub pipeline_config: PipelineConfig,
    pub cache_policy: CachePolicy,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(MemoryStore::new()),
            fetcher: MockFetcher::new(),
            extractor: MockExtractor::new(),
            holidays: FixedHolidays::new(),
            pipeline_config: PipelineConfig::default(),
            cache_policy: CachePolicy::default(),
        }
    }

    /// Set a mock page fetcher
    pub fn mock_fetcher(mut self, fetcher: MockFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Set a mock extractor
    pub fn mock_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the holiday calendar
    pub fn holidays(mut self, holidays: FixedHolidays) -> Self {
        self.holidays = holidays;
        self
    }

    /// Set the pipeline timeouts
    pub fn pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline_config = config;
        self
    }

    /// Set the cache windows
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Convert to ServerDeps for use in tests
    pub fn into_server_deps(self) -> ServerDeps {
        let cache: Arc<dyn MenuCache> = self.cache;
        ServerDeps::new(
            cache,
            Arc::new(self.fetcher),
            Arc::new(self.extractor),
            Arc::new(self.holidays),
            TEST_API_KEY,
        )
        .with_pipeline_config(self.pipeline_config)
        .with_cache_policy(self.cache_policy)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
