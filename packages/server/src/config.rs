use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub api_secret_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Max age of a cached menu that may still be served
    pub cache_freshness: chrono::Duration,
    /// Max age before a cached menu is purged at startup
    pub cache_retention: chrono::Duration,
    pub fetch_timeout: Duration,
    pub extraction_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("openai_model", &self.openai_model)
            .field("cache_freshness", &self.cache_freshness)
            .field("cache_retention", &self.cache_retention)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("extraction_timeout", &self.extraction_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cache.db".to_string()),
            port: parse_or("PORT", 8080)?,
            api_secret_key: env::var("API_SECRET_KEY")
                .context("API_SECRET_KEY must be set")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            cache_freshness: chrono::Duration::hours(parse_or("CACHE_FRESHNESS_HOURS", 6)?),
            cache_retention: chrono::Duration::hours(parse_or("CACHE_RETENTION_HOURS", 24)?),
            fetch_timeout: Duration::from_secs(parse_or("FETCH_TIMEOUT_SECS", 10)?),
            extraction_timeout: Duration::from_secs(parse_or("EXTRACTION_TIMEOUT_SECS", 60)?),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.api_secret_key.trim().is_empty() {
            bail!("API_SECRET_KEY must not be empty");
        }
        if self.cache_freshness <= chrono::Duration::zero() {
            bail!("CACHE_FRESHNESS_HOURS must be positive");
        }
        if self.cache_retention < self.cache_freshness {
            bail!(
                "CACHE_RETENTION_HOURS ({}) must not be shorter than CACHE_FRESHNESS_HOURS ({})",
                self.cache_retention.num_hours(),
                self.cache_freshness.num_hours()
            );
        }
        Ok(())
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            api_secret_key: "secret".to_string(),
            openai_api_key: "sk-test".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            cache_freshness: chrono::Duration::hours(6),
            cache_retention: chrono::Duration::hours(24),
            fetch_timeout: Duration::from_secs(10),
            extraction_timeout: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_retention_shorter_than_freshness_rejected() {
        let mut cfg = config();
        cfg.cache_retention = chrono::Duration::hours(2);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("CACHE_RETENTION_HOURS"));
    }

    #[test]
    fn test_blank_secret_rejected() {
        let mut cfg = config();
        cfg.api_secret_key = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("sk-test"));
    }
}
