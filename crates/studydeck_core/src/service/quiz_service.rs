//! Quiz attempt use-case service.
//!
//! # Responsibility
//! - Record finished quiz sessions into durable history.
//! - Expose the cumulative counters the badge engine consumes.

use crate::model::quiz::{AttemptDraft, QuizAttempt};
use crate::repo::quiz_repo::QuizRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for quiz attempt recording.
pub struct QuizService<R: QuizRepository> {
    repo: R,
}

impl<R: QuizRepository> QuizService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and records one finished quiz session.
    ///
    /// Attempts are immutable once stored; failures leave no partial state.
    pub fn record_attempt(&self, draft: &AttemptDraft) -> RepoResult<QuizAttempt> {
        self.repo.record_attempt(draft)
    }

    /// Full attempt history in completion order.
    pub fn attempts(&self) -> RepoResult<Vec<QuizAttempt>> {
        self.repo.list_attempts()
    }

    /// Cumulative number of quizzes ever taken.
    pub fn attempts_total(&self) -> RepoResult<u64> {
        self.repo.attempts_total()
    }
}
