use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use studydeck_core::db::open_db_in_memory;
use studydeck_core::{
    ConnectivityProbe, DatasetSource, FetchError, QuestionBankRepository, QuestionFetcher,
    QuestionRecord, SqliteQuestionBankRepository, SyncConfig, SyncCoordinator,
};

const HOUR_MS: i64 = 60 * 60 * 1000;

struct MockFetcher {
    records: Vec<QuestionRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockFetcher {
    fn serving(records: Vec<QuestionRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuestionFetcher for MockFetcher {
    fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::new("connection reset"));
        }
        Ok(self.records.clone())
    }
}

struct MockProbe {
    online: bool,
}

impl ConnectivityProbe for MockProbe {
    fn is_connected(&self) -> bool {
        self.online
    }
}

fn probe(online: bool) -> Option<Arc<dyn ConnectivityProbe>> {
    Some(Arc::new(MockProbe { online }))
}

fn question(id: i64, category: &str) -> QuestionRecord {
    QuestionRecord {
        id,
        category: category.to_string(),
        prompt: format!("prompt {id}"),
        choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        answer_index: 1,
    }
}

fn day_config() -> SyncConfig {
    SyncConfig {
        stale_after: Duration::from_secs(24 * 60 * 60),
    }
}

#[test]
fn offline_serves_cache_and_never_fetches() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::serving(vec![question(1, "science")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(false),
        day_config(),
    );

    let dataset = coordinator.get_dataset_at(HOUR_MS).unwrap();
    assert_eq!(dataset.source, DatasetSource::Cache);
    assert!(dataset.records.is_empty());
    assert!(dataset.warning.is_none());
    assert_eq!(fetcher.call_count(), 0);
}

#[test]
fn missing_connectivity_capability_behaves_like_offline() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::serving(vec![question(1, "science")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        None,
        day_config(),
    );

    let dataset = coordinator.get_dataset_at(HOUR_MS).unwrap();
    assert_eq!(dataset.source, DatasetSource::Cache);
    assert!(dataset.records.is_empty());
    assert_eq!(fetcher.call_count(), 0);
}

#[test]
fn first_online_read_fetches_and_persists_the_dataset() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::serving(vec![question(1, "science"), question(2, "history")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(true),
        day_config(),
    );

    let dataset = coordinator.get_dataset_at(HOUR_MS).unwrap();
    assert_eq!(dataset.source, DatasetSource::Fresh);
    assert_eq!(dataset.records.len(), 2);
    assert_eq!(fetcher.call_count(), 1);

    let repo = SqliteQuestionBankRepository::new(&conn);
    assert_eq!(repo.last_fetched_at().unwrap(), Some(HOUR_MS));
    assert_eq!(repo.load_questions().unwrap(), dataset.records);
}

#[test]
fn reads_within_the_staleness_window_reuse_the_cache() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::serving(vec![question(1, "science")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(true),
        day_config(),
    );

    let first = coordinator.get_dataset_at(HOUR_MS).unwrap();
    assert_eq!(first.source, DatasetSource::Fresh);

    let second = coordinator.get_dataset_at(HOUR_MS + 23 * HOUR_MS).unwrap();
    assert_eq!(second.source, DatasetSource::Cache);
    assert_eq!(second.records, first.records);
    assert_eq!(fetcher.call_count(), 1);
}

#[test]
fn a_read_past_the_window_refreshes_and_restamps() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::serving(vec![question(1, "science")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(true),
        day_config(),
    );

    coordinator.get_dataset_at(HOUR_MS).unwrap();
    let later = HOUR_MS + 25 * HOUR_MS;
    let refreshed = coordinator.get_dataset_at(later).unwrap();

    assert_eq!(refreshed.source, DatasetSource::Fresh);
    assert_eq!(fetcher.call_count(), 2);

    let repo = SqliteQuestionBankRepository::new(&conn);
    assert_eq!(repo.last_fetched_at().unwrap(), Some(later));
}

#[test]
fn fetch_failure_serves_the_stale_cache_with_a_warning() {
    let conn = open_db_in_memory().unwrap();

    let cached = vec![question(1, "science"), question(2, "history")];
    SqliteQuestionBankRepository::new(&conn)
        .replace_questions(&cached, HOUR_MS)
        .unwrap();

    let fetcher = MockFetcher::failing();
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(true),
        day_config(),
    );

    let dataset = coordinator.get_dataset_at(HOUR_MS + 48 * HOUR_MS).unwrap();
    assert_eq!(dataset.source, DatasetSource::StaleAfterFetchError);
    assert_eq!(dataset.records, cached);
    let warning = dataset.warning.expect("warning should be surfaced");
    assert!(warning.message.contains("connection reset"));
    assert_eq!(fetcher.call_count(), 1);

    // The failed refresh left both the cache and its timestamp untouched.
    let repo = SqliteQuestionBankRepository::new(&conn);
    assert_eq!(repo.last_fetched_at().unwrap(), Some(HOUR_MS));
    assert_eq!(repo.load_questions().unwrap(), cached);
}

#[test]
fn fetch_failure_on_an_empty_cache_returns_empty_with_a_warning() {
    let conn = open_db_in_memory().unwrap();
    let fetcher = MockFetcher::failing();
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher.clone(),
        probe(true),
        day_config(),
    );

    let dataset = coordinator.get_dataset_at(HOUR_MS).unwrap();
    assert_eq!(dataset.source, DatasetSource::StaleAfterFetchError);
    assert!(dataset.records.is_empty());
    assert!(dataset.warning.is_some());

    let repo = SqliteQuestionBankRepository::new(&conn);
    assert_eq!(repo.last_fetched_at().unwrap(), None);
}

#[test]
fn refresh_replaces_the_previous_dataset_wholesale() {
    let conn = open_db_in_memory().unwrap();

    SqliteQuestionBankRepository::new(&conn)
        .replace_questions(&[question(1, "science")], HOUR_MS)
        .unwrap();

    let fetcher = MockFetcher::serving(vec![question(7, "geography"), question(8, "geography")]);
    let coordinator = SyncCoordinator::new(
        SqliteQuestionBankRepository::new(&conn),
        fetcher,
        probe(true),
        day_config(),
    );

    let later = HOUR_MS + 30 * HOUR_MS;
    let dataset = coordinator.get_dataset_at(later).unwrap();
    assert_eq!(dataset.source, DatasetSource::Fresh);

    let repo = SqliteQuestionBankRepository::new(&conn);
    let stored = repo.load_questions().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|record| record.category == "geography"));
}
