// Main entry point for the menu summarization server

use std::sync::Arc;

use anyhow::{Context, Result};
use menu_extraction::{CzechHolidays, HttpFetcher, OpenAIExtractor, PipelineConfig, SqliteStore};
use menu_server::{
    kernel::{CachePolicy, ServerDeps},
    server::build_app,
    Config,
};
use openai_client::OpenAIClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,menu_server=debug,menu_extraction=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting menu summarization server");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(?config, "Configuration loaded");

    tracing::info!("Opening menu cache...");
    let cache = SqliteStore::new(&config.database_url)
        .await
        .context("Failed to open menu cache")?;
    tracing::info!("Menu cache ready");

    let fetcher = HttpFetcher::new()
        .context("Failed to build HTTP client")?
        .with_timeout(config.fetch_timeout);

    let openai = OpenAIClient::new(config.openai_api_key.clone())
        .with_timeout(config.extraction_timeout);
    let extractor = OpenAIExtractor::new(openai).with_model(config.openai_model.clone());

    let deps = ServerDeps::new(
        Arc::new(cache),
        Arc::new(fetcher),
        Arc::new(extractor),
        Arc::new(CzechHolidays::new()),
        config.api_secret_key.clone(),
    )
    .with_pipeline_config(
        PipelineConfig::default()
            .with_fetch_timeout(config.fetch_timeout)
            .with_extraction_timeout(config.extraction_timeout),
    )
    .with_cache_policy(CachePolicy {
        freshness: config.cache_freshness,
        retention: config.cache_retention,
    });

    let (app, menus) = build_app(deps);

    menus
        .evict_expired()
        .await
        .context("Failed to evict expired menus")?;

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
