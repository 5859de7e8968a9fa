//! Rate Query Service
//!
//! Read-side orchestration over the `RateReader` port: input validation,
//! per-request timeouts and error mapping. Contains NO infrastructure logic.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use rates_types::{AppError, CurrencyId, CurrencyRate, RateReader, RepoError};

/// Bound on a point-in-time lookup.
pub const RATE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound on a paginated listing.
pub const RATES_LISTING_TIMEOUT: Duration = Duration::from_secs(25);

/// Application service for rate queries.
///
/// Generic over `R: RateReader` - the adapter is injected at compile time.
pub struct RateQueryService<R: RateReader> {
    repo: R,
    lookup_timeout: Duration,
    listing_timeout: Duration,
}

impl<R: RateReader> RateQueryService<R> {
    /// Creates a new query service with the default timeouts.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            lookup_timeout: RATE_LOOKUP_TIMEOUT,
            listing_timeout: RATES_LISTING_TIMEOUT,
        }
    }

    /// Overrides the lookup and listing timeouts.
    pub fn with_timeouts(mut self, lookup: Duration, listing: Duration) -> Self {
        self.lookup_timeout = lookup;
        self.listing_timeout = listing;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Gets the rate of a currency recorded exactly at midnight UTC of `date`.
    pub async fn get_rate(
        &self,
        currency_id: CurrencyId,
        date: NaiveDate,
    ) -> Result<CurrencyRate, AppError> {
        let at = start_of_day(date);
        bounded(self.lookup_timeout, self.repo.get_at(currency_id, at)).await
    }

    /// Lists one page of rates. Pages are 1-based.
    pub async fn list_rates(&self, page: u32) -> Result<Vec<CurrencyRate>, AppError> {
        if page == 0 {
            return Err(AppError::BadRequest("page must be greater than 0".into()));
        }

        bounded(self.listing_timeout, self.repo.list_page(page)).await
    }
}

/// The instant a calendar date query refers to.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

async fn bounded<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, RepoError>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Rate store query timed out");
            Err(AppError::Internal("Rate store query timed out".into()))
        }
    }
}
