//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use rates_types::{
    CurrencyId, CurrencyRate, NewCurrencyRate, PAGE_SIZE, RateId, RateReader, RateWriter,
    RepoError, insertion_time, page_offset,
};

use crate::types::{SqliteRateRow, format_timestamp, is_storable_instant};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_rates.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateWriter for SqliteRepo {
    async fn insert(&self, rate: NewCurrencyRate) -> Result<CurrencyRate, RepoError> {
        let now = insertion_time();

        let result = sqlx::query(
            r#"INSERT INTO rates (currency_id, name, abbreviation, rate, inserted_at) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(rate.currency_id.get())
        .bind(&rate.name)
        .bind(&rate.abbreviation)
        .bind(rate.rate)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rate.into_stored(RateId::new(result.last_insert_rowid()), now))
    }
}

#[async_trait]
impl RateReader for SqliteRepo {
    async fn list_page(&self, page: u32) -> Result<Vec<CurrencyRate>, RepoError> {
        let rows: Vec<SqliteRateRow> = sqlx::query_as(
            r#"SELECT id, currency_id, name, abbreviation, rate, inserted_at FROM rates
               ORDER BY inserted_at, currency_id, id LIMIT ? OFFSET ?"#,
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteRateRow::into_domain).collect()
    }

    async fn get_at(
        &self,
        currency_id: CurrencyId,
        at: DateTime<Utc>,
    ) -> Result<CurrencyRate, RepoError> {
        if !is_storable_instant(at) {
            return Err(RepoError::NotFound);
        }

        let row: Option<SqliteRateRow> = sqlx::query_as(
            r#"SELECT id, currency_id, name, abbreviation, rate, inserted_at FROM rates
               WHERE currency_id = ? AND inserted_at = ? ORDER BY id LIMIT 1"#,
        )
        .bind(currency_id.get())
        .bind(format_timestamp(at))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.ok_or(RepoError::NotFound)?.into_domain()
    }
}
