//! IngestionService unit tests.

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::watch;

    use rates_types::{
        CurrencyId, CurrencyRate, IngestError, NbrbRate, NewCurrencyRate, RateId, RateSource,
        RateWriter, RepoError, SourceError, insertion_time,
    };

    use crate::{INGESTION_INTERVAL, IngestionService};

    /// In-memory writer that can be told to reject some currencies.
    #[derive(Default)]
    struct MockWriter {
        rates: Mutex<Vec<CurrencyRate>>,
        reject: HashSet<CurrencyId>,
    }

    impl MockWriter {
        fn rejecting(ids: &[i64]) -> Self {
            Self {
                reject: ids.iter().copied().map(CurrencyId::new).collect(),
                ..Self::default()
            }
        }

        fn stored(&self) -> Vec<CurrencyRate> {
            self.rates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RateWriter for MockWriter {
        async fn insert(&self, rate: NewCurrencyRate) -> Result<CurrencyRate, RepoError> {
            if self.reject.contains(&rate.currency_id) {
                return Err(RepoError::Database("constraint violation".into()));
            }
            let mut rates = self.rates.lock().unwrap();
            let id = RateId::new(rates.len() as i64 + 1);
            let stored = rate.into_stored(id, insertion_time());
            rates.push(stored.clone());
            Ok(stored)
        }
    }

    /// Source that replays scripted responses, then returns empty sets.
    #[derive(Default)]
    struct MockSource {
        responses: Mutex<VecDeque<Result<Vec<NbrbRate>, SourceError>>>,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn scripted(responses: Vec<Result<Vec<NbrbRate>, SourceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for MockSource {
        async fn fetch_rates(&self) -> Result<Vec<NbrbRate>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn nbrb(cur_id: i64, abbreviation: &str, name: &str, rate: f64) -> NbrbRate {
        NbrbRate {
            cur_id,
            date: "2024-05-02T00:00:00".to_string(),
            cur_abbreviation: abbreviation.to_string(),
            cur_scale: 1,
            cur_name: name.to_string(),
            cur_official_rate: rate,
        }
    }

    fn usd_eur() -> Vec<NbrbRate> {
        vec![
            nbrb(1, "USD", "US Dollar", 2.95),
            nbrb(2, "EUR", "Euro", 3.20),
        ]
    }

    #[tokio::test]
    async fn test_collect_rates_inserts_in_upstream_order() {
        let writer = Arc::new(MockWriter::default());
        let source = MockSource::scripted(vec![Ok(usd_eur())]);
        let service = IngestionService::new(writer.clone(), source);

        let inserted = service.collect_rates().await.unwrap();

        assert_eq!(inserted, 2);
        let stored = writer.stored();
        assert_eq!(stored[0].abbreviation, "USD");
        assert_eq!(stored[0].rate, 2.95);
        assert_eq!(stored[1].abbreviation, "EUR");
        assert_ne!(stored[0].unique_id, stored[1].unique_id);
    }

    #[tokio::test]
    async fn test_insert_failures_are_skipped() {
        let writer = Arc::new(MockWriter::rejecting(&[2]));
        let source = MockSource::scripted(vec![Ok(vec![
            nbrb(1, "USD", "US Dollar", 2.95),
            nbrb(2, "EUR", "Euro", 3.20),
            nbrb(3, "RUB", "Russian Ruble", 3.41),
            nbrb(4, "PLN", "Zloty", 0.81),
        ])]);
        let service = IngestionService::new(writer.clone(), source);

        let inserted = service.collect_rates().await.unwrap();

        assert_eq!(inserted, 3);
        let abbreviations: Vec<_> = writer
            .stored()
            .into_iter()
            .map(|r| r.abbreviation)
            .collect();
        assert_eq!(abbreviations, vec!["USD", "RUB", "PLN"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_store_unchanged() {
        let writer = Arc::new(MockWriter::default());
        let source = MockSource::scripted(vec![Err(SourceError::Status(502))]);
        let service = IngestionService::new(writer.clone(), source);

        let result = service.collect_rates().await;

        assert!(matches!(
            result,
            Err(IngestError::Fetch(SourceError::Status(502)))
        ));
        assert!(writer.stored().is_empty());
    }

    #[tokio::test]
    async fn test_start_fails_when_first_fetch_fails() {
        let writer = Arc::new(MockWriter::default());
        let source = MockSource::scripted(vec![Err(SourceError::Request("dns".into()))]);
        let (_tx, rx) = watch::channel(false);

        let result = IngestionService::new(writer.clone(), source).start(rx).await;

        assert!(matches!(result, Err(IngestError::Fetch(_))));
        assert!(writer.stored().is_empty());
    }

    #[tokio::test]
    async fn test_start_succeeds_despite_insert_failures() {
        let writer = Arc::new(MockWriter::rejecting(&[1, 2]));
        let source = MockSource::scripted(vec![Ok(usd_eur())]);
        let (tx, rx) = watch::channel(false);

        let handle = IngestionService::new(writer.clone(), source)
            .start(rx)
            .await
            .unwrap();

        assert!(writer.stored().is_empty());
        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_cycle_survives_fetch_failure() {
        let writer = Arc::new(MockWriter::default());
        let source = Arc::new(MockSource::scripted(vec![
            Ok(usd_eur()),
            Err(SourceError::Decode("truncated body".into())),
            Ok(vec![nbrb(3, "RUB", "Russian Ruble", 3.41)]),
        ]));
        let (tx, rx) = watch::channel(false);

        let handle = IngestionService::new(writer.clone(), source.clone())
            .start(rx)
            .await
            .unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(writer.stored().len(), 2);

        // Nothing happens before the first period elapses.
        tokio::time::sleep(INGESTION_INTERVAL - Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);

        // Second cycle: fetch fails, store untouched.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(writer.stored().len(), 2);

        // Third cycle still fires.
        tokio::time::sleep(INGESTION_INTERVAL).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(writer.stored().len(), 3);
        assert_eq!(writer.stored()[2].abbreviation, "RUB");

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_the_loop() {
        let writer = Arc::new(MockWriter::default());
        let source = Arc::new(MockSource::scripted(vec![Ok(usd_eur())]));
        let (tx, rx) = watch::channel(false);

        let handle = IngestionService::new(writer.clone(), source.clone())
            .with_interval(Duration::from_secs(60))
            .start(rx)
            .await
            .unwrap();

        tx.send(true).unwrap();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_shutdown_sender_stops_the_loop() {
        let writer = Arc::new(MockWriter::default());
        let source = MockSource::scripted(vec![Ok(usd_eur())]);
        let (tx, rx) = watch::channel(false);

        let handle = IngestionService::new(writer, source)
            .start(rx)
            .await
            .unwrap();
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
