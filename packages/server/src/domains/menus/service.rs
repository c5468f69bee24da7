//! Menu service - the cache-or-extract decision for one request.
//!
//! For a (URL, today) pair the service serves a fresh cached document when one
//! exists, and otherwise runs the extraction pipeline and stores a successful
//! result. Failed extractions are returned to the caller but never stored.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use menu_extraction::{DegradedMenu, MenuCache, MenuDocument, MenuPipeline, PipelineOutcome};

use super::inflight::InflightRegistry;
use crate::kernel::{CachePolicy, ServerDeps};

/// What a summarize request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SummarizeOutcome {
    /// Served from the cache without running the pipeline
    Cached(MenuDocument),

    /// Extracted by this request and written to the cache
    Fresh(MenuDocument),

    /// The model failed; not cached so a later request retries
    Degraded(DegradedMenu),

    /// The restaurant page could not be loaded
    UpstreamUnavailable { reason: String },

    /// The page publishes its menu as an image
    ImageOnly,
}

impl SummarizeOutcome {
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

#[derive(Debug, Error)]
pub enum MenuServiceError {
    /// The refresh task panicked or was cancelled by the runtime
    #[error("menu refresh failed: {0}")]
    Internal(String),
}

/// Orchestrates cache lookups, pipeline runs and cache writes.
#[derive(Clone)]
pub struct MenuService {
    inner: Arc<Inner>,
}

struct Inner {
    cache: Arc<dyn MenuCache>,
    pipeline: MenuPipeline,
    policy: CachePolicy,
    inflight: InflightRegistry<SummarizeOutcome>,
}

impl MenuService {
    pub fn new(deps: &ServerDeps) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache: deps.cache.clone(),
                pipeline: deps.pipeline(),
                policy: deps.cache_policy,
                inflight: InflightRegistry::new(),
            }),
        }
    }

    /// Summarize the menu at `source_url` for today (process-local calendar).
    pub async fn summarize(&self, source_url: &str) -> Result<SummarizeOutcome, MenuServiceError> {
        self.summarize_for(source_url, Local::now().date_naive())
            .await
    }

    /// Summarize the menu at `source_url` for the logical `date`.
    pub async fn summarize_for(
        &self,
        source_url: &str,
        date: NaiveDate,
    ) -> Result<SummarizeOutcome, MenuServiceError> {
        if let Some(document) = self.cached(source_url, date).await {
            info!(url = %source_url, date = %date, "Menu cache hit");
            return Ok(SummarizeOutcome::Cached(document));
        }
        info!(url = %source_url, date = %date, "Menu cache miss");

        // The refresh runs detached so a disconnecting caller cannot cancel a
        // half-finished extraction; its result still lands in the cache.
        let service = self.clone();
        let url = source_url.to_string();
        let refresh = tokio::spawn(async move { service.refresh(&url, date).await });

        refresh.await.map_err(|e| {
            error!(url = %source_url, date = %date, error = %e, "Menu refresh task failed");
            MenuServiceError::Internal(e.to_string())
        })
    }

    /// Remove cached menus older than the retention window.
    pub async fn evict_expired(&self) -> menu_extraction::Result<u64> {
        let removed = self
            .inner
            .cache
            .evict_older_than(self.inner.policy.retention)
            .await?;
        info!(
            removed,
            retention_hours = self.inner.policy.retention.num_hours(),
            "Expired menus evicted"
        );
        Ok(removed)
    }

    async fn refresh(&self, source_url: &str, date: NaiveDate) -> SummarizeOutcome {
        let mut lease = self.inner.inflight.acquire(source_url, date).await;

        // The request we queued behind already has an answer
        if let Some(outcome) = lease.shared() {
            debug!(url = %source_url, date = %date, "Sharing result of a concurrent refresh");
            return match outcome.clone() {
                SummarizeOutcome::Fresh(document) => SummarizeOutcome::Cached(document),
                other => other,
            };
        }

        // Another request may have filled the key while we waited
        if let Some(document) = self.cached(source_url, date).await {
            debug!(url = %source_url, date = %date, "Menu filled by a concurrent request");
            return SummarizeOutcome::Cached(document);
        }

        let outcome = match self.inner.pipeline.run(source_url, date).await {
            PipelineOutcome::Done(document) => {
                if let Err(e) = self.inner.cache.upsert(source_url, date, &document).await {
                    warn!(url = %source_url, date = %date, error = %e, "Failed to cache menu");
                }
                SummarizeOutcome::Fresh(document)
            }
            PipelineOutcome::ExtractionFailed(degraded) => SummarizeOutcome::Degraded(degraded),
            PipelineOutcome::FetchFailed { reason } => {
                SummarizeOutcome::UpstreamUnavailable { reason }
            }
            PipelineOutcome::RejectedImageOnly => SummarizeOutcome::ImageOnly,
        };

        lease.publish(outcome.clone());
        outcome
    }

    /// Fresh cached document, if any. Read failures count as a miss.
    async fn cached(&self, source_url: &str, date: NaiveDate) -> Option<MenuDocument> {
        match self
            .inner
            .cache
            .lookup(source_url, date, self.inner.policy.freshness)
            .await
        {
            Ok(document) => document,
            Err(e) => {
                warn!(url = %source_url, date = %date, error = %e, "Menu cache read failed");
                None
            }
        }
    }
}
