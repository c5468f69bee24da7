//! API errors and their HTTP rendering.
//!
//! Every error renders as `{"error": "<message>"}` with the mapped status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domains::menus::MenuServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable `Authorization: Bearer <token>` header
    #[error("Missing or invalid Authorization header")]
    MissingCredentials,

    /// Bearer token does not match the configured secret
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Body missing, not JSON, or without a usable `url`
    #[error("Missing URL")]
    MissingUrl,

    #[error("Failed to load menu page")]
    UpstreamUnavailable,

    #[error("Menu appears to be mostly in image form")]
    ImageOnlyMenu,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidApiKey => StatusCode::FORBIDDEN,
            Self::MissingUrl | Self::ImageOnlyMenu => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MenuServiceError> for ApiError {
    fn from(_: MenuServiceError) -> Self {
        // Details are logged where the failure happened; callers get a generic body
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidApiKey.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::MissingUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UpstreamUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(MenuServiceError::Internal("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_body_shape() {
        let response = ApiError::ImageOnlyMenu.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({"error": "Menu appears to be mostly in image form"})
        );
    }
}
