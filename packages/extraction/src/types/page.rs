//! Fetched page - raw HTML plus the visible text handed to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::html;

/// A page as returned by a [`PageFetcher`](crate::traits::fetcher::PageFetcher).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    /// Raw HTML body
    pub html: String,

    /// Visible text extracted from `html`
    pub text: String,

    /// Page title if available
    pub title: Option<String>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Build a page from raw HTML, deriving text and title.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let html = html.into();
        let text = html::visible_text(&html);
        let title = html::title(&html);

        Self {
            final_url: url.clone(),
            url,
            html,
            text,
            title,
            fetched_at: Utc::now(),
        }
    }

    /// Set the URL reached after redirects.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Whether the page carries only images where the menu should be.
    pub fn is_mostly_image(&self) -> bool {
        html::is_mostly_image(&self.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_derives_text_and_title() {
        let page = FetchedPage::from_html(
            "https://example.test/menu",
            "<html><head><title>Jídelní lístek</title></head><body><p>Guláš 149 Kč</p></body></html>",
        );

        assert_eq!(page.final_url, page.url);
        assert_eq!(page.title.as_deref(), Some("Jídelní lístek"));
        assert!(page.text.contains("Guláš 149 Kč"));
        assert!(!page.is_mostly_image());
    }
}
