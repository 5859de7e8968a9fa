//! # Rates Source
//!
//! Client for the official rates feed of the National Bank of the Republic
//! of Belarus. It implements the `RateSource` port: one GET of today's daily
//! (periodicity 0) rate set, no retries.
//!
//! # Example
//! ```ignore
//! use rates_source::NbrbClient;
//! use rates_types::RateSource;
//!
//! let client = NbrbClient::new(reqwest::Client::new());
//! let rates = client.fetch_rates().await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;

use rates_types::{NbrbRate, RateSource, SourceError};

/// Host of the NBRB API.
pub const NBRB_BASE_URL: &str = "https://api.nbrb.by";

/// Path and query of the daily rate set.
const DAILY_RATES_PATH: &str = "/exrates/rates?periodicity=0";

/// NBRB API client.
#[derive(Clone)]
pub struct NbrbClient {
    base_url: String,
    http: Client,
}

impl NbrbClient {
    /// Creates a client for the production NBRB API.
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, NBRB_BASE_URL)
    }

    /// Creates a client against another host, e.g. a mock server in tests.
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Full URL of the daily rate set.
    pub fn rates_url(&self) -> String {
        format!("{}{}", self.base_url, DAILY_RATES_PATH)
    }
}

#[async_trait]
impl RateSource for NbrbClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_rates(&self) -> Result<Vec<NbrbRate>, SourceError> {
        let resp = self
            .http
            .get(self.rates_url())
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let rates: Vec<NbrbRate> =
            serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))?;

        tracing::debug!("Fetched {} rates from NBRB", rates.len());
        Ok(rates)
    }
}
