//! Extraction pipeline - from a URL to a finished menu document.
//!
//! One run walks through:
//! - Fetch the page (bounded by a timeout)
//! - Reject pages that publish the menu as an image
//! - Ask the model for the menu (bounded by a timeout)
//! - Post-process: prices, allergens, dietary flags, backfill, holiday info
//!
//! Every run ends in exactly one [`PipelineOutcome`]. The pipeline never
//! touches the cache; deciding what to store is the caller's job.

pub mod dietary;
pub mod postprocess;
pub mod price;
pub mod prompts;

pub use dietary::correct_dietary_flags;
pub use postprocess::{
    build_document, holiday_advisory, parse_model_output, strip_code_fences, INVALID_JSON_ERROR,
};
pub use price::{normalize_price, parse_price_text};
pub use prompts::{format_menu_prompt, MAX_PAGE_CHARS, MENU_PROMPT, SYSTEM_PROMPT};

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{CrawlError, ExtractionError};
use crate::traits::{
    ai::{ExtractionRequest, MenuExtractor},
    calendar::HolidayCalendar,
    fetcher::PageFetcher,
};
use crate::types::menu::{DegradedMenu, MenuDocument};

/// Time bounds for the two network stages.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub fetch_timeout: Duration,
    pub extraction_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            extraction_timeout: Duration::from_secs(60),
        }
    }
}

impl PipelineConfig {
    /// Set the page fetch bound.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the model call bound.
    pub fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }
}

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The page could not be loaded (transport error, timeout, non-2xx)
    FetchFailed { reason: String },

    /// The page shows the menu as a picture
    RejectedImageOnly,

    /// The model failed or answered with something unusable
    ExtractionFailed(DegradedMenu),

    /// A finished document
    Done(MenuDocument),
}

impl PipelineOutcome {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "fetch_failed",
            Self::RejectedImageOnly => "rejected_image_only",
            Self::ExtractionFailed(_) => "extraction_failed",
            Self::Done(_) => "done",
        }
    }
}

/// Runs fetch → validate → extract → post-process for one URL and day.
#[derive(Clone)]
pub struct MenuPipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn MenuExtractor>,
    holidays: Arc<dyn HolidayCalendar>,
    config: PipelineConfig,
}

impl MenuPipeline {
    /// Create a pipeline with default timeouts.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn MenuExtractor>,
        holidays: Arc<dyn HolidayCalendar>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            holidays,
            config: PipelineConfig::default(),
        }
    }

    /// Set the stage timeouts.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline for `source_url` on the logical `date`.
    pub async fn run(&self, source_url: &str, date: NaiveDate) -> PipelineOutcome {
        let started = Instant::now();
        let outcome = self.run_stages(source_url, date).await;

        match &outcome {
            PipelineOutcome::Done(doc) => info!(
                url = %source_url,
                date = %date,
                items = doc.menu_items.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Menu extracted"
            ),
            other => warn!(
                url = %source_url,
                date = %date,
                outcome = other.label(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Menu extraction did not complete"
            ),
        }

        outcome
    }

    async fn run_stages(&self, source_url: &str, date: NaiveDate) -> PipelineOutcome {
        // 1. Fetch
        debug!(url = %source_url, fetcher = self.fetcher.name(), "Fetching page");
        let fetched =
            tokio::time::timeout(self.config.fetch_timeout, self.fetcher.fetch(source_url)).await;

        let page = match fetched {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => return fetch_failed(source_url, e),
            Err(_) => {
                return fetch_failed(
                    source_url,
                    CrawlError::Timeout {
                        url: source_url.to_string(),
                    },
                )
            }
        };

        // 2. Validate
        if page.is_mostly_image() {
            debug!(url = %source_url, text_chars = page.text.chars().count(), "Page is mostly images");
            return PipelineOutcome::RejectedImageOnly;
        }

        // 3. Extract
        debug!(
            url = %source_url,
            extractor = self.extractor.name(),
            text_chars = page.text.chars().count(),
            "Requesting menu extraction"
        );
        let request = ExtractionRequest::new(&page.text, source_url, date);
        let extracted = tokio::time::timeout(
            self.config.extraction_timeout,
            self.extractor.extract(&request),
        )
        .await
        .unwrap_or(Err(ExtractionError::Timeout(self.config.extraction_timeout)));

        let raw = match extracted {
            Ok(raw) => raw,
            Err(e) => {
                warn!(url = %source_url, error = %e, "Model extraction failed");
                return PipelineOutcome::ExtractionFailed(DegradedMenu {
                    error: e.to_string(),
                    raw_output: None,
                });
            }
        };

        // 4. Post-process
        let fields = match parse_model_output(&raw) {
            Ok(fields) => fields,
            Err(degraded) => {
                warn!(url = %source_url, raw_chars = raw.len(), "Model returned invalid JSON");
                return PipelineOutcome::ExtractionFailed(degraded);
            }
        };

        let holiday = self.holidays.holiday_name(date);
        if let Some(name) = &holiday {
            debug!(date = %date, holiday = %name, "Logical date is a public holiday");
        }

        PipelineOutcome::Done(build_document(
            fields,
            source_url,
            date,
            holiday.as_deref(),
        ))
    }
}

fn fetch_failed(source_url: &str, error: CrawlError) -> PipelineOutcome {
    warn!(url = %source_url, error = %error, "Page fetch failed");
    PipelineOutcome::FetchFailed {
        reason: error.to_string(),
    }
}
