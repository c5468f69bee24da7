use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::server::error::ApiError;

/// Verifies bearer tokens against the shared API secret.
///
/// Only a digest of the secret is kept; tokens are compared digest to digest
/// so the comparison time does not depend on how much of the secret matched.
#[derive(Clone)]
pub struct ApiKeyAuth {
    digest: [u8; 32],
}

impl ApiKeyAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    pub fn verify(&self, token: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        presented
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth").finish_non_exhaustive()
    }
}

/// Bearer token from the Authorization header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// API key middleware
///
/// Rejects the request before the handler runs (and before its body is read):
/// missing or malformed header → 401, wrong key → 403.
pub async fn require_api_key(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        debug!("Request without bearer token");
        ApiError::MissingCredentials
    })?;

    if !auth.verify(token) {
        debug!("Request with invalid API key");
        return Err(ApiError::InvalidApiKey);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(from_fn_with_state(ApiKeyAuth::new("s3cret"), require_api_key))
    }

    async fn status_for(auth_header: Option<&str>) -> StatusCode {
        let mut request = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth_header {
            request = request.header("authorization", value);
        }
        test_app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_key_passes() {
        assert_eq!(status_for(Some("Bearer s3cret")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_is_unauthorized() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(Some("s3cret")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(Some("Basic s3cret")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(Some("Bearer ")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_key_is_forbidden() {
        assert_eq!(status_for(Some("Bearer nope")).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some("Bearer s3cret2")).await, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
