//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rates_types::{CurrencyId, NewCurrencyRate, RateReader, RateWriter, RepoError};

    use crate::SqliteRepo;
    use crate::types::format_timestamp;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn usd() -> NewCurrencyRate {
        NewCurrencyRate::new(CurrencyId::new(1), "US Dollar", "USD", 2.95)
    }

    fn eur() -> NewCurrencyRate {
        NewCurrencyRate::new(CurrencyId::new(2), "Euro", "EUR", 3.20)
    }

    /// Inserts a row with a chosen timestamp, bypassing the clock.
    async fn insert_at(repo: &SqliteRepo, currency_id: i64, at: DateTime<Utc>) -> i64 {
        sqlx::query(
            r#"INSERT INTO rates (currency_id, name, abbreviation, rate, inserted_at) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(currency_id)
        .bind(format!("Currency {}", currency_id))
        .bind(format!("C{}", currency_id))
        .bind(currency_id as f64 / 10.0)
        .bind(format_timestamp(at))
        .execute(repo.pool())
        .await
        .unwrap()
        .last_insert_rowid()
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let repo = setup_repo().await;

        let mut ids = HashSet::new();
        for _ in 0..5 {
            let stored = repo.insert(usd()).await.unwrap();
            assert!(stored.unique_id.get() > 0);
            assert!(ids.insert(stored.unique_id));
        }

        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_insert_stamps_current_time() {
        let repo = setup_repo().await;

        let before = Utc::now() - Duration::seconds(1);
        let stored = repo.insert(usd()).await.unwrap();
        let after = Utc::now() + Duration::seconds(1);

        assert!(stored.inserted_at > before && stored.inserted_at < after);
        assert_eq!(stored.currency_id, CurrencyId::new(1));
        assert_eq!(stored.name, "US Dollar");
        assert_eq!(stored.abbreviation, "USD");
        assert_eq!(stored.rate, 2.95);
    }

    #[tokio::test]
    async fn test_get_at_returns_inserted_record() {
        let repo = setup_repo().await;

        let stored = repo.insert(eur()).await.unwrap();
        let fetched = repo
            .get_at(stored.currency_id, stored.inserted_at)
            .await
            .unwrap();

        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_get_at_not_found() {
        let repo = setup_repo().await;
        let stored = repo.insert(usd()).await.unwrap();

        let wrong_currency = repo
            .get_at(CurrencyId::new(99), stored.inserted_at)
            .await;
        assert!(matches!(wrong_currency, Err(RepoError::NotFound)));

        let wrong_time = repo
            .get_at(stored.currency_id, stored.inserted_at + Duration::microseconds(1))
            .await;
        assert!(matches!(wrong_time, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_at_requires_exact_timestamp() {
        let repo = setup_repo().await;
        insert_at(&repo, 1, base_time() + Duration::hours(3)).await;

        // Midnight of the same day is not a match: equality, not range.
        let midnight = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let result = repo.get_at(CurrencyId::new(1), midnight).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_at_duplicates_return_lowest_id() {
        let repo = setup_repo().await;

        let first = insert_at(&repo, 5, base_time()).await;
        let second = insert_at(&repo, 5, base_time()).await;
        assert!(first < second);

        let fetched = repo.get_at(CurrencyId::new(5), base_time()).await.unwrap();
        assert_eq!(fetched.unique_id.get(), first);
    }

    #[tokio::test]
    async fn test_get_at_sub_microsecond_instant_is_not_found() {
        let repo = setup_repo().await;
        insert_at(&repo, 1, base_time()).await;

        let result = repo
            .get_at(CurrencyId::new(1), base_time() + Duration::nanoseconds(1))
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_page_empty_table() {
        let repo = setup_repo().await;

        let page = repo.list_page(1).await.unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_list_page_orders_by_time_then_currency() {
        let repo = setup_repo().await;

        let later = base_time() + Duration::minutes(1);
        insert_at(&repo, 3, later).await;
        insert_at(&repo, 2, base_time()).await;
        insert_at(&repo, 7, base_time()).await;
        insert_at(&repo, 1, later).await;

        let page = repo.list_page(1).await.unwrap();
        let keys: Vec<_> = page
            .iter()
            .map(|r| (r.inserted_at, r.currency_id.get()))
            .collect();

        assert_eq!(
            keys,
            vec![
                (base_time(), 2),
                (base_time(), 7),
                (later, 1),
                (later, 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_pages_concatenate_to_full_ordering() {
        let repo = setup_repo().await;

        // 25 rows over three cycles, inserted out of order within each cycle.
        for cycle in 0..3i64 {
            let at = base_time() + Duration::days(cycle);
            let count = if cycle == 2 { 5 } else { 10 };
            for currency in (1..=count).rev() {
                insert_at(&repo, currency, at).await;
            }
        }

        let mut all = Vec::new();
        for page in 1..=3 {
            let rows = repo.list_page(page).await.unwrap();
            assert!(rows.len() <= 10);
            all.extend(rows);
        }

        assert_eq!(all.len(), 25);
        assert!(repo.list_page(4).await.unwrap().is_empty());

        let ids: HashSet<_> = all.iter().map(|r| r.unique_id).collect();
        assert_eq!(ids.len(), 25, "no duplicates across pages");

        assert!(
            all.windows(2)
                .all(|w| w[0].listing_key() <= w[1].listing_key()),
            "pages must be ordered by (inserted_at, currency_id)"
        );
    }

    #[tokio::test]
    async fn test_list_page_zero_behaves_as_first_page() {
        let repo = setup_repo().await;
        for currency in 1..=3 {
            insert_at(&repo, currency, base_time()).await;
        }

        let zero = repo.list_page(0).await.unwrap();
        let first = repo.list_page(1).await.unwrap();

        assert_eq!(zero, first);
    }

    #[tokio::test]
    async fn test_ingestion_scenario_lists_both_currencies() {
        let repo = setup_repo().await;

        let dollar = repo.insert(usd()).await.unwrap();
        let euro = repo.insert(eur()).await.unwrap();
        assert_ne!(dollar.unique_id, euro.unique_id);

        let page = repo.list_page(1).await.unwrap();

        assert_eq!(page.len(), 2);
        assert!(page[0].listing_key() <= page[1].listing_key());
        let abbreviations: HashSet<_> = page.iter().map(|r| r.abbreviation.as_str()).collect();
        assert_eq!(abbreviations, HashSet::from(["USD", "EUR"]));
    }

    #[tokio::test]
    async fn test_zero_and_negative_rates_are_stored() {
        let repo = setup_repo().await;

        let zero = repo
            .insert(NewCurrencyRate::new(CurrencyId::new(10), "Zero", "ZER", 0.0))
            .await
            .unwrap();
        let negative = repo
            .insert(NewCurrencyRate::new(CurrencyId::new(11), "Negative", "NEG", -4.5))
            .await
            .unwrap();

        let fetched = repo
            .get_at(negative.currency_id, negative.inserted_at)
            .await
            .unwrap();

        assert_eq!(zero.rate, 0.0);
        assert_eq!(fetched.rate, -4.5);
    }

    #[tokio::test]
    async fn test_on_disk_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rates.db");
        let url = format!("sqlite://{}", path.display());

        let repo = SqliteRepo::new(&url).await.unwrap();
        repo.insert(usd()).await.unwrap();

        assert!(path.exists());
        assert_eq!(repo.list_page(1).await.unwrap().len(), 1);
    }
}
