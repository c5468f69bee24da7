//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the extraction library
//! without making real model or network calls.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ExtractionError, Result};
use crate::traits::{
    ai::{ExtractionRequest, MenuExtractor},
    calendar::HolidayCalendar,
};

pub use crate::ingestors::MockFetcher;

#[derive(Debug, Clone)]
enum MockReply {
    Output(String),
    Failure(String),
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone)]
pub struct MockExtractorCall {
    pub source_url: String,
    pub date: NaiveDate,
    pub text: String,
}

/// A mock menu extractor for testing.
///
/// Replies come from a queue of one-shot replies first, then from the
/// default reply. With neither configured every call fails.
#[derive(Default, Clone)]
pub struct MockExtractor {
    queued: Arc<RwLock<VecDeque<MockReply>>>,
    default_reply: Arc<RwLock<Option<MockReply>>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<MockExtractorCall>>>,
}

impl MockExtractor {
    /// Create a new mock extractor with no replies configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call with `raw` model output.
    pub fn with_output(self, raw: impl Into<String>) -> Self {
        *self.default_reply.write().unwrap() = Some(MockReply::Output(raw.into()));
        self
    }

    /// Fail every call with a provider error.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.default_reply.write().unwrap() = Some(MockReply::Failure(message.into()));
        self
    }

    /// Answer the next unanswered call with `raw`, before the default reply.
    pub fn with_next_output(self, raw: impl Into<String>) -> Self {
        self.queued
            .write()
            .unwrap()
            .push_back(MockReply::Output(raw.into()));
        self
    }

    /// Sleep before answering, to exercise timeouts and request overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockExtractorCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    fn next_reply(&self) -> Option<MockReply> {
        self.queued
            .write()
            .unwrap()
            .pop_front()
            .or_else(|| self.default_reply.read().unwrap().clone())
    }
}

#[async_trait]
impl MenuExtractor for MockExtractor {
    async fn extract(&self, request: &ExtractionRequest<'_>) -> Result<String> {
        self.calls.write().unwrap().push(MockExtractorCall {
            source_url: request.source_url.to_string(),
            date: request.date,
            text: request.text.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply() {
            Some(MockReply::Output(raw)) => Ok(raw),
            Some(MockReply::Failure(message)) => Err(ExtractionError::AI(message.into())),
            None => Err(ExtractionError::AI("no mock reply configured".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Holiday calendar with an explicit set of holidays.
#[derive(Debug, Default, Clone)]
pub struct FixedHolidays {
    holidays: HashMap<NaiveDate, String>,
}

impl FixedHolidays {
    /// A calendar without holidays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `date` as a holiday called `name`.
    pub fn with_holiday(mut self, date: NaiveDate, name: impl Into<String>) -> Self {
        self.holidays.insert(date, name.into());
        self
    }
}

impl HolidayCalendar for FixedHolidays {
    fn holiday_name(&self, date: NaiveDate) -> Option<String> {
        self.holidays.get(&date).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> (NaiveDate, &'static str) {
        (NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(), "Guláš 149 Kč")
    }

    #[tokio::test]
    async fn test_queued_replies_come_first() {
        let mock = MockExtractor::new()
            .with_output("{}")
            .with_next_output("not json");
        let (date, text) = request();
        let req = ExtractionRequest::new(text, "https://example.test", date);

        assert_eq!(mock.extract(&req).await.unwrap(), "not json");
        assert_eq!(mock.extract(&req).await.unwrap(), "{}");
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.calls()[0].text, "Guláš 149 Kč");
    }

    #[tokio::test]
    async fn test_unconfigured_mock_fails() {
        let mock = MockExtractor::new();
        let (date, text) = request();
        let req = ExtractionRequest::new(text, "https://example.test", date);

        assert!(matches!(
            mock.extract(&req).await,
            Err(ExtractionError::AI(_))
        ));
    }

    #[test]
    fn test_fixed_holidays() {
        let (date, _) = request();
        let calendar = FixedHolidays::new().with_holiday(date, "Test Day");

        assert_eq!(calendar.holiday_name(date).as_deref(), Some("Test Day"));
        assert!(!calendar.is_holiday(date.succ_opt().unwrap()));
    }
}
