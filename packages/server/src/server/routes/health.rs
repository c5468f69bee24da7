use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AppState;

const CACHE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    cache: CacheHealth,
}

#[derive(Debug, Serialize)]
pub struct CacheHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Counts cache entries as a liveness probe of the store.
/// Returns 200 OK when the store answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let cache = match tokio::time::timeout(CACHE_CHECK_TIMEOUT, state.cache.count_entries()).await
    {
        Ok(Ok(entries)) => CacheHealth {
            status: "ok".to_string(),
            entries: Some(entries),
            error: None,
        },
        Ok(Err(e)) => CacheHealth {
            status: "error".to_string(),
            entries: None,
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => CacheHealth {
            status: "error".to_string(),
            entries: None,
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    let is_healthy = cache.status == "ok";
    let (status_code, status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            cache,
        }),
    )
}
