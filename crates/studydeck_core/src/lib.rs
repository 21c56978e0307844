//! Core domain logic for StudyDeck.
//! This crate is the single source of truth for business invariants:
//! durable task/quiz storage, offline-first question bank reconciliation,
//! and the derived progress analytics built on top of them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::badge::Badge;
pub use model::question::QuestionRecord;
pub use model::quiz::{AttemptDraft, QuizAttempt};
pub use model::task::{Priority, Task, TaskDraft, TaskPatch, TaskStatus};
pub use model::ValidationError;
pub use repo::marker_repo::{ChallengeMarkerRepository, SqliteChallengeMarkerRepository};
pub use repo::question_repo::{
    QuestionBankRepository, SqliteQuestionBankRepository, QUESTION_BANK_META_KEY,
};
pub use repo::quiz_repo::{QuizRepository, SqliteQuizRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskOrder, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::badge_engine::{BadgeEngine, BadgeRule, BADGE_RULES};
pub use service::challenge::{pick_question, DailyChallengeGate};
pub use service::progress::{
    aggregate_attempts, CategoryScore, ProgressAggregator, DEFAULT_WEAK_THRESHOLD,
};
pub use service::quiz_service::QuizService;
pub use service::task_service::TaskService;
pub use sync::{
    ConnectivityProbe, Dataset, DatasetSource, FetchError, QuestionFetcher, SyncConfig,
    SyncCoordinator, SyncWarning, DEFAULT_STALE_AFTER,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
