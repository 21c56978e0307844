//! Daily challenge gate and question draw.
//!
//! # Responsibility
//! - Enforce at most one challenge completion per calendar day.
//! - Draw the day's question uniformly from the available dataset.
//!
//! # Invariants
//! - `try_consume` is the sole gate for accepting a challenge answer.
//! - Question selection is stateless; only the consumption marker is
//!   durable.

use crate::model::question::QuestionRecord;
use crate::repo::marker_repo::ChallengeMarkerRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;
use rand::seq::SliceRandom;

/// Durable once-per-day gate over the challenge marker.
pub struct DailyChallengeGate<R: ChallengeMarkerRepository> {
    repo: R,
}

impl<R: ChallengeMarkerRepository> DailyChallengeGate<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Consumes today's challenge slot if still available.
    ///
    /// Returns `true` exactly once per calendar date across restarts;
    /// repeated calls with the same or an earlier date return `false` and
    /// leave the marker untouched.
    pub fn try_consume(&self, today: NaiveDate) -> RepoResult<bool> {
        let granted = self.repo.try_advance(today)?;
        if granted {
            info!("event=daily_challenge module=challenge status=granted date={today}");
        }
        Ok(granted)
    }

    /// Date of the last accepted completion, if any.
    pub fn last_completion_date(&self) -> RepoResult<Option<NaiveDate>> {
        self.repo.last_completion_date()
    }
}

/// Draws one question uniformly at random; `None` on an empty dataset.
pub fn pick_question(records: &[QuestionRecord]) -> Option<&QuestionRecord> {
    records.choose(&mut rand::thread_rng())
}
