//! Currency rate domain model.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted rate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateId(i64);

impl RateId {
    /// Wraps an identifier handed out by the store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External currency identifier (the NBRB `Cur_ID`).
///
/// Stable across snapshots: one currency has many rate records over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(i64);

impl CurrencyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A rate observation that has not been stored yet.
///
/// It carries neither an id nor a timestamp: both are assigned at the
/// storage boundary by [`RateWriter::insert`](crate::RateWriter::insert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCurrencyRate {
    pub currency_id: CurrencyId,
    pub name: String,
    pub abbreviation: String,
    /// Official rate as published upstream. No bounds are enforced.
    pub rate: f64,
}

impl NewCurrencyRate {
    pub fn new(
        currency_id: CurrencyId,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            currency_id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            rate,
        }
    }

    /// Completes the record once the store has assigned its id.
    pub fn into_stored(self, unique_id: RateId, inserted_at: DateTime<Utc>) -> CurrencyRate {
        CurrencyRate {
            unique_id,
            currency_id: self.currency_id,
            name: self.name,
            abbreviation: self.abbreviation,
            rate: self.rate,
            inserted_at,
        }
    }
}

/// One stored observation of a currency's official rate.
///
/// Records are immutable once created; the table is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Assigned by the store on insertion
    pub unique_id: RateId,
    pub currency_id: CurrencyId,
    pub name: String,
    pub abbreviation: String,
    pub rate: f64,
    /// Ingestion time, not the upstream's reported date
    pub inserted_at: DateTime<Utc>,
}

impl CurrencyRate {
    /// Reconstructs a rate from database fields.
    pub fn from_parts(
        unique_id: RateId,
        currency_id: CurrencyId,
        name: String,
        abbreviation: String,
        rate: f64,
        inserted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            unique_id,
            currency_id,
            name,
            abbreviation,
            rate,
            inserted_at,
        }
    }

    /// Listing sort key: `(inserted_at, currency_id)`.
    pub fn listing_key(&self) -> (DateTime<Utc>, CurrencyId) {
        (self.inserted_at, self.currency_id)
    }
}

/// Current time truncated to microseconds.
///
/// Both storage backends keep microsecond precision, so stamping with this
/// value makes the returned record equal to what is read back later.
pub fn insertion_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
