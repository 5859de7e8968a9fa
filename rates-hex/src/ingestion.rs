//! Rate Ingestion Service
//!
//! Periodically pulls the official rate snapshot from the upstream source and
//! appends every record to the store. Each record is inserted on its own: a
//! failed insert is logged and skipped, the rest of the cycle carries on.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use rates_types::{IngestError, NewCurrencyRate, RateSource, RateWriter};

/// Time between two scheduled cycles.
pub const INGESTION_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Fetch-then-insert loop over a rate source and a rate writer.
pub struct IngestionService<W: RateWriter, S: RateSource> {
    writer: W,
    source: S,
    interval: Duration,
}

impl<W: RateWriter, S: RateSource> IngestionService<W, S> {
    /// Creates a service that runs every [`INGESTION_INTERVAL`].
    pub fn new(writer: W, source: S) -> Self {
        Self {
            writer,
            source,
            interval: INGESTION_INTERVAL,
        }
    }

    /// Overrides the schedule period.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs one cycle inline, then schedules the rest in the background.
    ///
    /// Fails only if the first fetch fails. Insert failures in that cycle are
    /// logged and do not fail the start. Later cycles never report errors to
    /// the caller; the loop ends once `shutdown` changes or its sender is
    /// dropped.
    pub async fn start(
        self,
        shutdown: watch::Receiver<bool>,
    ) -> Result<JoinHandle<()>, IngestError> {
        let inserted = self.collect_rates().await?;
        tracing::info!(inserted, "Initial rates collection finished");

        Ok(tokio::spawn(self.run(shutdown)))
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    tracing::info!("Rates ingestion stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            match self.collect_rates().await {
                Ok(inserted) => tracing::info!(inserted, "Scheduled rates collection finished"),
                Err(e) => tracing::error!(error = %e, "Scheduled rates collection failed"),
            }
        }
    }

    /// One ingestion cycle. Returns the number of records stored.
    #[tracing::instrument(skip(self))]
    pub async fn collect_rates(&self) -> Result<usize, IngestError> {
        let rates = self.source.fetch_rates().await?;
        let total = rates.len();

        let mut inserted = 0;
        for rate in rates {
            let rate = NewCurrencyRate::from(rate);
            let (currency_id, value) = (rate.currency_id, rate.rate);
            let abbreviation = rate.abbreviation.clone();

            match self.writer.insert(rate).await {
                Ok(stored) => {
                    tracing::trace!(id = %stored.unique_id, %currency_id, "Rate stored");
                    inserted += 1;
                }
                Err(e) => tracing::warn!(
                    %currency_id,
                    %abbreviation,
                    rate = value,
                    error = %e,
                    "Failed to insert currency rate"
                ),
            }
        }

        tracing::debug!(total, inserted, "Rates collected");
        Ok(inserted)
    }
}
