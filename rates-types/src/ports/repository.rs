//! Repository port traits.
//!
//! The rate store is split into a write-only and a read-only capability so
//! that the ingestion loop and the query façade each depend on the subset
//! they use. Adapters (Postgres, SQLite, in-memory mocks) implement both.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{CurrencyId, CurrencyRate, NewCurrencyRate};
use crate::error::RepoError;

/// Number of records in one listing page.
pub const PAGE_SIZE: i64 = 10;

/// Write side of the append-only rate store.
#[async_trait::async_trait]
pub trait RateWriter: Send + Sync + 'static {
    /// Appends one record, stamping it with the current time.
    ///
    /// Returns the stored record with its store-assigned id. A single insert
    /// is atomic.
    async fn insert(&self, rate: NewCurrencyRate) -> Result<CurrencyRate, RepoError>;
}

/// Read side of the append-only rate store.
#[async_trait::async_trait]
pub trait RateReader: Send + Sync + 'static {
    /// Lists up to [`PAGE_SIZE`] records of a 1-based page, ordered by
    /// `(inserted_at, currency_id)` ascending.
    ///
    /// Past the end an empty page is returned. The page number is not
    /// validated here.
    async fn list_page(&self, page: u32) -> Result<Vec<CurrencyRate>, RepoError>;

    /// Finds the record of `currency_id` whose `inserted_at` equals `at`
    /// exactly. Among duplicates the lowest id wins.
    ///
    /// Returns [`RepoError::NotFound`] when nothing matches.
    async fn get_at(
        &self,
        currency_id: CurrencyId,
        at: DateTime<Utc>,
    ) -> Result<CurrencyRate, RepoError>;
}

/// Offset of a 1-based page. Page 0 is treated as page 1.
pub fn page_offset(page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * PAGE_SIZE
}

#[async_trait::async_trait]
impl<T: RateWriter + ?Sized> RateWriter for Arc<T> {
    async fn insert(&self, rate: NewCurrencyRate) -> Result<CurrencyRate, RepoError> {
        (**self).insert(rate).await
    }
}

#[async_trait::async_trait]
impl<T: RateReader + ?Sized> RateReader for Arc<T> {
    async fn list_page(&self, page: u32) -> Result<Vec<CurrencyRate>, RepoError> {
        (**self).list_page(page).await
    }

    async fn get_at(
        &self,
        currency_id: CurrencyId,
        at: DateTime<Utc>,
    ) -> Result<CurrencyRate, RepoError> {
        (**self).get_at(currency_id, at).await
    }
}
