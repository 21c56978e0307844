//! Cache-first dataset coordinator with bounded staleness.
//!
//! # Responsibility
//! - Serve the question bank from cache while it is fresh, refresh it when
//!   stale and the device is online, and fall back to the cache otherwise.
//!
//! # Invariants
//! - `fetch_questions` is never invoked while offline or within the
//!   staleness window.
//! - Cache replacement and `last_fetched_at` advance atomically; an
//!   abandoned or failed fetch leaves both untouched.

use crate::repo::question_repo::QuestionBankRepository;
use crate::repo::RepoResult;
use crate::sync::{
    ConnectivityProbe, Dataset, DatasetSource, QuestionFetcher, SyncConfig, SyncWarning,
};
use log::{info, warn};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Decides, per call, whether the cached question bank is still the answer.
pub struct SyncCoordinator<R: QuestionBankRepository> {
    repo: R,
    fetcher: Arc<dyn QuestionFetcher>,
    probe: Option<Arc<dyn ConnectivityProbe>>,
    config: SyncConfig,
}

impl<R: QuestionBankRepository> SyncCoordinator<R> {
    /// Creates a coordinator.
    ///
    /// `probe = None` models a platform without a connectivity capability;
    /// such a coordinator always serves the cache.
    pub fn new(
        repo: R,
        fetcher: Arc<dyn QuestionFetcher>,
        probe: Option<Arc<dyn ConnectivityProbe>>,
        config: SyncConfig,
    ) -> Self {
        Self {
            repo,
            fetcher,
            probe,
            config,
        }
    }

    /// Returns the question dataset using the wall clock for staleness.
    pub fn get_dataset(&self) -> RepoResult<Dataset> {
        self.get_dataset_at(now_epoch_ms())
    }

    /// Returns the question dataset, judging staleness against `now_ms`.
    ///
    /// Decision order:
    /// 1. offline or no probe: cached records verbatim, never an error;
    /// 2. online and cache absent or older than `stale_after`: fetch,
    ///    persist atomically, return fresh records;
    /// 3. online and fresh: cached records without fetching.
    ///
    /// A failed fetch in step 2 keeps the cache untouched and returns it
    /// with a `SyncWarning` attached.
    pub fn get_dataset_at(&self, now_ms: i64) -> RepoResult<Dataset> {
        let online = self
            .probe
            .as_ref()
            .map(|probe| probe.is_connected())
            .unwrap_or(false);

        if !online {
            return Ok(Dataset {
                records: self.repo.load_questions()?,
                source: DatasetSource::Cache,
                warning: None,
            });
        }

        if !self.cache_is_stale(now_ms)? {
            return Ok(Dataset {
                records: self.repo.load_questions()?,
                source: DatasetSource::Cache,
                warning: None,
            });
        }

        info!("event=sync_fetch module=sync status=start");
        match self.fetcher.fetch_questions() {
            Ok(records) => {
                self.repo.replace_questions(&records, now_ms)?;
                info!(
                    "event=sync_fetch module=sync status=ok record_count={}",
                    records.len()
                );
                Ok(Dataset {
                    records,
                    source: DatasetSource::Fresh,
                    warning: None,
                })
            }
            Err(err) => {
                warn!("event=sync_fetch module=sync status=error error={err}");
                Ok(Dataset {
                    records: self.repo.load_questions()?,
                    source: DatasetSource::StaleAfterFetchError,
                    warning: Some(SyncWarning {
                        message: err.to_string(),
                    }),
                })
            }
        }
    }

    fn cache_is_stale(&self, now_ms: i64) -> RepoResult<bool> {
        let stale_after_ms = self.config.stale_after.as_millis() as i64;
        Ok(match self.repo.last_fetched_at()? {
            None => true,
            Some(fetched_at) => now_ms.saturating_sub(fetched_at) > stale_after_ms,
        })
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
