//! Database row structs and conversion helpers for both backends.

#![allow(dead_code)]

use chrono::{DateTime, Timelike, Utc};

use rates_types::{CurrencyId, CurrencyRate, RateId, RepoError};

/// Whether `at` can equal a stored timestamp.
///
/// Stored timestamps have microsecond precision; anything finer can never
/// match exactly and must not be rounded into a match by the driver.
pub fn is_storable_instant(at: DateTime<Utc>) -> bool {
    at.nanosecond() % 1_000 == 0
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

/// Rate row from PostgreSQL (`TIMESTAMPTZ` decodes natively).
#[cfg(feature = "postgres")]
#[derive(sqlx::FromRow)]
pub struct PgRateRow {
    pub id: i64,
    pub currency_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub rate: f64,
    pub inserted_at: DateTime<Utc>,
}

#[cfg(feature = "postgres")]
impl PgRateRow {
    /// Convert database row to domain CurrencyRate.
    pub fn into_domain(self) -> CurrencyRate {
        CurrencyRate::from_parts(
            RateId::new(self.id),
            CurrencyId::new(self.currency_id),
            self.name,
            self.abbreviation,
            self.rate,
            self.inserted_at,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

/// Rate row from SQLite (timestamps are stored as fixed-width RFC 3339 text).
#[cfg(feature = "sqlite")]
#[derive(sqlx::FromRow)]
pub struct SqliteRateRow {
    pub id: i64,
    pub currency_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub rate: f64,
    pub inserted_at: String,
}

#[cfg(feature = "sqlite")]
impl SqliteRateRow {
    /// Convert database row to domain CurrencyRate.
    pub fn into_domain(self) -> Result<CurrencyRate, RepoError> {
        let inserted_at = parse_timestamp(&self.inserted_at)?;

        Ok(CurrencyRate::from_parts(
            RateId::new(self.id),
            CurrencyId::new(self.currency_id),
            self.name,
            self.abbreviation,
            self.rate,
            inserted_at,
        ))
    }
}

/// Text encoding of a timestamp for SQLite.
///
/// Always microsecond precision with a `Z` suffix, so the strings have a
/// fixed width and sort chronologically.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Database(e.to_string()))
}
