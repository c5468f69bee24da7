use axum::{
    body::Bytes,
    extract::Extension,
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domains::menus::SummarizeOutcome;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Response header telling the caller whether the menu came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-menu-cache";

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl SummarizeRequest {
    /// Parse a raw body; anything without a non-blank `url` string is rejected.
    pub fn parse(body: &[u8]) -> Result<String, ApiError> {
        let request: SummarizeRequest =
            serde_json::from_slice(body).map_err(|_| ApiError::MissingUrl)?;

        request
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingUrl)
    }
}

/// POST /summarize
///
/// Body: `{"url": "<restaurant page>"}`. Returns today's menu document, or a
/// degraded `{error, raw_output}` body when the model output was unusable.
pub async fn summarize_handler(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let url = SummarizeRequest::parse(&body)?;

    let outcome = state.menus.summarize(&url).await?;
    let cache_status = if outcome.is_cache_hit() { "hit" } else { "miss" };

    let mut response = match outcome {
        SummarizeOutcome::Cached(document) | SummarizeOutcome::Fresh(document) => {
            Json(document).into_response()
        }
        SummarizeOutcome::Degraded(degraded) => {
            warn!(url = %url, error = %degraded.error, "Returning degraded menu");
            Json(degraded).into_response()
        }
        SummarizeOutcome::UpstreamUnavailable { reason } => {
            info!(url = %url, reason = %reason, "Menu page unavailable");
            return Err(ApiError::UpstreamUnavailable);
        }
        SummarizeOutcome::ImageOnly => return Err(ApiError::ImageOnlyMenu),
    };

    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
    Ok(response)
}
