//! SQLite cache implementation.
//!
//! One table, keyed by (url, date). Good for:
//! - Single-server deployments
//! - Local development
//! - Testing with persistent data

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::traits::store::MenuCache;
use crate::types::{entry::CacheEntry, menu::MenuDocument};

/// SQLite-backed menu cache.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `database_url`.
    ///
    /// # Example URLs
    /// - `sqlite://cache.db` - File next to the working directory
    /// - `sqlite:///var/lib/menus/cache.db` - Absolute path
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(ExtractionError::storage)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(ExtractionError::storage)?;

        Self::with_pool(pool).await
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Each connection to `:memory:` is its own database, so the pool holds
    /// exactly one connection and never recycles it.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(ExtractionError::storage)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(ExtractionError::storage)?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS menu_cache (
                url TEXT NOT NULL,
                date TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (url, date)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(ExtractionError::storage)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_cache_created_at ON menu_cache(created_at)")
            .execute(&self.pool)
            .await
            .map_err(ExtractionError::storage)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fixed-width UTC timestamp; string order equals time order.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, FromRow)]
struct MenuRow {
    url: String,
    date: String,
    data: String,
    created_at: String,
}

impl MenuRow {
    fn into_entry(self) -> Result<CacheEntry> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| ExtractionError::storage(format!("Invalid date: {}", e)))?;

        let written_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| ExtractionError::storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        let document: MenuDocument = serde_json::from_str(&self.data)
            .map_err(|e| ExtractionError::storage(format!("Invalid menu JSON: {}", e)))?;

        Ok(CacheEntry {
            source_url: self.url,
            date,
            document,
            written_at,
        })
    }
}

#[async_trait]
impl MenuCache for SqliteStore {
    async fn get_entry(&self, source_url: &str, date: NaiveDate) -> Result<Option<CacheEntry>> {
        let row = sqlx::query_as::<_, MenuRow>(
            "SELECT url, date, data, created_at FROM menu_cache WHERE url = ? AND date = ?",
        )
        .bind(source_url)
        .bind(date_key(date))
        .fetch_optional(&self.pool)
        .await
        .map_err(ExtractionError::storage)?;

        row.map(MenuRow::into_entry).transpose()
    }

    async fn put_entry(&self, entry: &CacheEntry) -> Result<()> {
        let data = serde_json::to_string(&entry.document)?;

        sqlx::query(
            r#"
            INSERT INTO menu_cache (url, date, data, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(url, date) DO UPDATE SET
                data = excluded.data,
                created_at = excluded.created_at
            "#,
        )
        .bind(&entry.source_url)
        .bind(date_key(entry.date))
        .bind(&data)
        .bind(timestamp(entry.written_at))
        .execute(&self.pool)
        .await
        .map_err(ExtractionError::storage)?;

        debug!(url = %entry.source_url, date = %entry.date, "Menu cached");
        Ok(())
    }

    async fn evict_written_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM menu_cache WHERE created_at < ?")
            .bind(timestamp(cutoff))
            .execute(&self.pool)
            .await
            .map_err(ExtractionError::storage)?;

        Ok(result.rows_affected())
    }

    async fn count_entries(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(ExtractionError::storage)?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::menu::MenuItem;
    use chrono::Duration;
    use std::sync::Arc;

    const URL: &str = "https://www.spojka-karlin.cz/menu";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()
    }

    fn document(name: &str) -> MenuDocument {
        let mut doc = MenuDocument::new(URL, today())
            .with_restaurant_name(name)
            .daily()
            .with_item(
                MenuItem::new("Hlavní jídlo", "Svíčková na smetaně")
                    .with_price(169)
                    .with_allergens(["1", "3", "7", "9"]),
            );
        doc.extra
            .insert("address".to_string(), serde_json::json!("Pernerova 57"));
        doc
    }

    #[tokio::test]
    async fn test_round_trip_preserves_document() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert(URL, today(), &document("SPOJKA")).await.unwrap();

        let hit = store
            .lookup(URL, today(), Duration::hours(6))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit, document("SPOJKA"));
        assert!(serde_json::to_string(&hit)
            .unwrap()
            .starts_with(r#"{"restaurant_name":"SPOJKA""#));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert(URL, today(), &document("Old")).await.unwrap();
        store.upsert(URL, today(), &document("New")).await.unwrap();

        assert_eq!(store.count_entries().await.unwrap(), 1);
        let entry = store.get_entry(URL, today()).await.unwrap().unwrap();
        assert_eq!(entry.document.restaurant_name.as_deref(), Some("New"));
    }

    #[tokio::test]
    async fn test_freshness_boundary() {
        let store = SqliteStore::in_memory().await.unwrap();
        let window = Duration::hours(6);
        let now = Utc::now();
        let entry = CacheEntry::new(URL, today(), document("SPOJKA"));

        store
            .put_entry(&entry.clone().with_written_at(now - window + Duration::seconds(5)))
            .await
            .unwrap();
        assert!(store.lookup(URL, today(), window).await.unwrap().is_some());

        store
            .put_entry(&entry.with_written_at(now - window - Duration::seconds(5)))
            .await
            .unwrap();
        assert!(store.lookup(URL, today(), window).await.unwrap().is_none());

        // Stale rows stay until the retention sweep
        assert_eq!(store.count_entries().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_retention_sweep() {
        let store = SqliteStore::in_memory().await.unwrap();
        let now = Utc::now();

        for (days_back, hours_old) in [(2, 50), (1, 26), (0, 1)] {
            let date = today() - Duration::days(days_back);
            store
                .put_entry(
                    &CacheEntry::new(URL, date, document("SPOJKA"))
                        .with_written_at(now - Duration::hours(hours_old)),
                )
                .await
                .unwrap();
        }

        let removed = store.evict_older_than(Duration::hours(24)).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.count_entries().await.unwrap(), 1);
        assert!(store.get_entry(URL, today()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_leave_one_row() {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert(URL, today(), &document(&format!("Writer {}", i)))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.count_entries().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "menu-cache-test-{}-{}.db",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let url = format!("sqlite://{}", path.display());

        {
            let store = SqliteStore::new(&url).await.unwrap();
            store.upsert(URL, today(), &document("SPOJKA")).await.unwrap();
            store.pool().close().await;
        }

        let reopened = SqliteStore::new(&url).await.unwrap();
        assert_eq!(reopened.count_entries().await.unwrap(), 1);
        reopened.pool().close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let early = Utc::now();
        let late = early + Duration::milliseconds(1);
        assert!(timestamp(early) < timestamp(late));
        assert_eq!(timestamp(early).len(), timestamp(late).len());
    }
}
