//! Upstream rate source port.
//!
//! Implementations can be HTTP clients, mock providers, etc.

use std::sync::Arc;

use crate::dto::NbrbRate;
use crate::error::SourceError;

/// Port trait for the remote provider of today's official rates.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the full daily rate set in one request.
    ///
    /// Any transport failure, non-success status or undecodable payload is
    /// an error; partial lists are never returned.
    async fn fetch_rates(&self) -> Result<Vec<NbrbRate>, SourceError>;
}

#[async_trait::async_trait]
impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    async fn fetch_rates(&self) -> Result<Vec<NbrbRate>, SourceError> {
        (**self).fetch_rates().await
    }
}
