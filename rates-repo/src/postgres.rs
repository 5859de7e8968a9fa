//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use rates_types::{
    CurrencyId, CurrencyRate, NewCurrencyRate, PAGE_SIZE, RateId, RateReader, RateWriter,
    RepoError, insertion_time, page_offset,
};

use crate::types::{PgRateRow, is_storable_instant};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository over the append-only `rates` table.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_rates_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateWriter for PostgresRepo {
    async fn insert(&self, rate: NewCurrencyRate) -> Result<CurrencyRate, RepoError> {
        let now = insertion_time();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO rates (currency_id, name, abbreviation, rate, inserted_at)
               VALUES ($1, $2, $3, $4, $5) RETURNING id"#,
        )
        .bind(rate.currency_id.get())
        .bind(&rate.name)
        .bind(&rate.abbreviation)
        .bind(rate.rate)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rate.into_stored(RateId::new(id), now))
    }
}

#[async_trait]
impl RateReader for PostgresRepo {
    async fn list_page(&self, page: u32) -> Result<Vec<CurrencyRate>, RepoError> {
        let rows: Vec<PgRateRow> = sqlx::query_as(
            r#"SELECT id, currency_id, name, abbreviation, rate, inserted_at FROM rates
               ORDER BY inserted_at, currency_id, id LIMIT $1 OFFSET $2"#,
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PgRateRow::into_domain).collect())
    }

    async fn get_at(
        &self,
        currency_id: CurrencyId,
        at: DateTime<Utc>,
    ) -> Result<CurrencyRate, RepoError> {
        if !is_storable_instant(at) {
            return Err(RepoError::NotFound);
        }

        let row: Option<PgRateRow> = sqlx::query_as(
            r#"SELECT id, currency_id, name, abbreviation, rate, inserted_at FROM rates
               WHERE currency_id = $1 AND inserted_at = $2 ORDER BY id LIMIT 1"#,
        )
        .bind(currency_id.get())
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgRateRow::into_domain).ok_or(RepoError::NotFound)
    }
}
