//! Test harness driving the full router in-process.
//!
//! Every test gets its own router, in-memory cache and mocks; requests go
//! through `tower::ServiceExt::oneshot` so no socket is bound.

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use menu_server::kernel::{ServerDeps, TestDependencies, TEST_API_KEY};
use menu_server::server::build_app;
use menu_server::server::routes::CACHE_STATUS_HEADER;

pub const MENU_URL: &str = "https://www.spojka-karlin.cz/menu";

/// A text menu long enough not to count as image-only.
pub const MENU_PAGE: &str = r#"<html><head><title>SPOJKA Karlín</title></head><body>
<h1>Denní menu</h1>
<img src="/logo.png">
<p>Polévka: Hovězí vývar s nudlemi 0,3 l 45 Kč (1, 3, 9)</p>
<p>Hlavní jídlo: Svíčková na smetaně, houskový knedlík 169 Kč (1, 3, 7, 9)</p>
<p>Hlavní jídlo: Smažený sýr, hranolky, tatarská omáčka 159 Kč (1, 3, 7)</p>
</body></html>"#;

pub const IMAGE_PAGE: &str = r#"<html><body><img src="/menu-tyden.jpg"></body></html>"#;

pub const MODEL_OUTPUT: &str = r#"```json
{
  "restaurant_name": "SPOJKA Karlín",
  "daily_menu": true,
  "menu_items": [
    {"category": "Polévka", "name": "Hovězí vývar s nudlemi", "price": "45 Kč", "allergens": ["1", "3", "9"], "weight": "0,3 l"},
    {"category": "Hlavní jídlo", "name": "Kuřecí řízek, bramborová kaše", "price": "169,-", "allergens": "1, 3, 7, 9", "vegetarian": true},
    {"category": "Hlavní jídlo", "name": "Smažený sýr", "price": 159, "allergens": [], "vegetarian": true}
  ]
}
```"#;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn cache_status(&self) -> Option<&str> {
        self.headers
            .get(CACHE_STATUS_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    pub fn error(&self) -> String {
        self.json()["error"].as_str().unwrap_or_default().to_string()
    }
}

pub struct TestHarness {
    app: Router,
}

impl TestHarness {
    /// Router over mocks and an in-memory cache. Tests keep clones of the
    /// mocks in `deps` to inspect calls afterwards.
    pub fn new(deps: &TestDependencies) -> Self {
        Self::from_server_deps(deps.clone().into_server_deps())
    }

    pub fn from_server_deps(deps: ServerDeps) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let (app, _menus) = build_app(deps);
        Self { app }
    }

    /// POST /summarize with the test API key.
    pub async fn summarize(&self, body: &str) -> TestResponse {
        let auth = format!("Bearer {}", TEST_API_KEY);
        self.summarize_with_auth(Some(&auth), body).await
    }

    /// POST /summarize for `url` with the test API key.
    pub async fn summarize_url(&self, url: &str) -> TestResponse {
        self.summarize(&serde_json::json!({ "url": url }).to_string())
            .await
    }

    pub async fn summarize_with_auth(&self, authorization: Option<&str>, body: &str) -> TestResponse {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/summarize")
            .header("content-type", "application/json");
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }
}
