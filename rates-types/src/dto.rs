//! Data Transfer Objects (DTOs) for the HTTP API and the upstream feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CurrencyId, CurrencyRate, NewCurrencyRate};

// ─────────────────────────────────────────────────────────────────────────────
// Upstream (NBRB) DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of `GET https://api.nbrb.by/exrates/rates?periodicity=0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbrbRate {
    #[serde(rename = "Cur_ID")]
    pub cur_id: i64,
    /// Date reported by the bank. Not persisted: records are stamped with
    /// the ingestion time instead.
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Cur_Abbreviation")]
    pub cur_abbreviation: String,
    #[serde(rename = "Cur_Scale")]
    pub cur_scale: i64,
    #[serde(rename = "Cur_Name")]
    pub cur_name: String,
    #[serde(rename = "Cur_OfficialRate")]
    pub cur_official_rate: f64,
}

impl From<NbrbRate> for NewCurrencyRate {
    fn from(rate: NbrbRate) -> Self {
        NewCurrencyRate::new(
            CurrencyId::new(rate.cur_id),
            rate.cur_name,
            rate.cur_abbreviation,
            rate.cur_official_rate,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query API DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response of the point-in-time lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateResponse {
    #[schema(example = "Доллар США")]
    pub name: String,
    #[schema(example = "USD")]
    pub abbreviation: String,
    #[schema(example = 2.95)]
    pub rate: f64,
}

impl From<CurrencyRate> for RateResponse {
    fn from(rate: CurrencyRate) -> Self {
        Self {
            name: rate.name,
            abbreviation: rate.abbreviation,
            rate: rate.rate,
        }
    }
}

/// One element of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateEntry {
    #[schema(example = "Евро")]
    pub name: String,
    #[schema(example = "EUR")]
    pub abbreviation: String,
    #[schema(example = 3.2)]
    pub rate: f64,
    /// When the record was ingested (RFC 3339)
    #[schema(value_type = String, example = "2024-01-01T00:00:00.123456Z")]
    pub date: DateTime<Utc>,
}

impl From<CurrencyRate> for RateEntry {
    fn from(rate: CurrencyRate) -> Self {
        Self {
            name: rate.name,
            abbreviation: rate.abbreviation,
            rate: rate.rate,
            date: rate.inserted_at,
        }
    }
}

/// Paginated listing response.
///
/// `total_pages` and `count` are part of the schema but are not computed:
/// they are always 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatesPageResponse {
    #[schema(example = 1)]
    pub current_page: u32,
    #[schema(example = 0)]
    pub total_pages: u32,
    #[schema(example = 0)]
    pub count: u32,
    pub data: Vec<RateEntry>,
}

impl RatesPageResponse {
    pub fn new(current_page: u32, rates: Vec<CurrencyRate>) -> Self {
        Self {
            current_page,
            total_pages: 0,
            count: 0,
            data: rates.into_iter().map(RateEntry::from).collect(),
        }
    }
}
