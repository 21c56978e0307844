//! Badge threshold evaluation.
//!
//! # Responsibility
//! - Compare the cumulative quiz counter against the declarative threshold
//!   table and persist awards exactly once each.
//!
//! # Invariants
//! - The threshold table is the single source of award conditions; no
//!   per-badge conditionals exist elsewhere.
//! - Re-evaluating with the same or a smaller counter awards nothing: the
//!   at-most-once guarantee is structural (`badges.name` primary key), not
//!   a property of caller bookkeeping.

use crate::model::badge::Badge;
use crate::repo::quiz_repo::QuizRepository;
use crate::repo::RepoResult;
use log::info;

/// One row of the declarative award table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    /// Minimum cumulative quizzes taken for the award.
    pub threshold: u64,
    pub name: &'static str,
}

/// Award table, ascending by threshold.
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        threshold: 5,
        name: "Quiz Novice",
    },
    BadgeRule {
        threshold: 20,
        name: "Quiz Master",
    },
];

/// Evaluates badge thresholds against durable badge state.
pub struct BadgeEngine<R: QuizRepository> {
    repo: R,
}

impl<R: QuizRepository> BadgeEngine<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Awards every badge whose threshold `total_quizzes_taken` meets and
    /// that has not been awarded before; returns the newly awarded names.
    pub fn evaluate(&self, total_quizzes_taken: u64) -> RepoResult<Vec<String>> {
        let mut newly_awarded = Vec::new();

        for rule in BADGE_RULES {
            if total_quizzes_taken < rule.threshold {
                continue;
            }
            if let Some(badge) = self.repo.award_badge(rule.name)? {
                info!(
                    "event=badge_awarded module=badge status=ok name={} total_quizzes={}",
                    badge.name, total_quizzes_taken
                );
                newly_awarded.push(badge.name);
            }
        }

        Ok(newly_awarded)
    }

    /// All badges awarded so far, in award order.
    pub fn badges(&self) -> RepoResult<Vec<Badge>> {
        self.repo.list_badges()
    }
}
