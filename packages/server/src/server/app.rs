//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use menu_extraction::MenuCache;

use crate::domains::menus::MenuService;
use crate::kernel::ServerDeps;
use crate::server::middleware::{require_api_key, ApiKeyAuth};
use crate::server::routes::{health_handler, summarize_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub menus: MenuService,
    pub cache: Arc<dyn MenuCache>,
}

/// Build the Axum application router
///
/// Returns (Router, MenuService) - the service is needed for the startup
/// retention sweep.
pub fn build_app(deps: ServerDeps) -> (Router, MenuService) {
    let menus = MenuService::new(&deps);
    let auth = ApiKeyAuth::new(&deps.api_secret_key);

    let app_state = AppState {
        menus: menus.clone(),
        cache: deps.cache.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let app = Router::new()
        .route("/summarize", post(summarize_handler))
        // Auth runs before the body is read, and only for matched routes
        .route_layer(middleware::from_fn_with_state(auth, require_api_key))
        // Health check (no auth)
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    (app, menus)
}
