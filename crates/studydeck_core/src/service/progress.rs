//! Per-category progress aggregation.
//!
//! # Responsibility
//! - Derive category accuracy statistics from the full attempt history.
//! - Flag weak categories below a configurable accuracy threshold.
//!
//! # Invariants
//! - Aggregates are recomputed on demand from storage, never cached.
//! - Each attempt weighs equally in the mean regardless of its `total`.
//! - A category with zero attempts is absent from results, never reported
//!   as a synthetic zero.

use crate::model::quiz::QuizAttempt;
use crate::repo::quiz_repo::QuizRepository;
use crate::repo::RepoResult;
use std::collections::{BTreeMap, BTreeSet};

/// Default accuracy threshold below which a category counts as weak.
pub const DEFAULT_WEAK_THRESHOLD: f64 = 0.7;

/// Derived accuracy statistics for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    /// Unweighted arithmetic mean of per-attempt `score/total`, in `[0, 1]`.
    pub mean_accuracy: f64,
    pub sample_count: usize,
}

/// Groups attempts by category and computes mean accuracy per group.
pub fn aggregate_attempts(attempts: &[QuizAttempt]) -> BTreeMap<String, CategoryScore> {
    let mut accuracy_sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for attempt in attempts {
        let entry = accuracy_sums
            .entry(attempt.category.as_str())
            .or_insert((0.0, 0));
        entry.0 += attempt.accuracy();
        entry.1 += 1;
    }

    accuracy_sums
        .into_iter()
        .map(|(category, (sum, count))| {
            (
                category.to_string(),
                CategoryScore {
                    category: category.to_string(),
                    mean_accuracy: sum / count as f64,
                    sample_count: count,
                },
            )
        })
        .collect()
}

/// On-demand aggregator over the durable attempt history.
pub struct ProgressAggregator<R: QuizRepository> {
    repo: R,
}

impl<R: QuizRepository> ProgressAggregator<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Computes per-category accuracy from all recorded attempts.
    pub fn compute_category_scores(&self) -> RepoResult<BTreeMap<String, CategoryScore>> {
        let attempts = self.repo.list_attempts()?;
        Ok(aggregate_attempts(&attempts))
    }

    /// Categories whose mean accuracy is strictly below `threshold`.
    ///
    /// A category sitting exactly at the threshold is not weak.
    pub fn weak_categories(&self, threshold: f64) -> RepoResult<BTreeSet<String>> {
        let scores = self.compute_category_scores()?;
        Ok(scores
            .into_values()
            .filter(|score| score.mean_accuracy < threshold)
            .map(|score| score.category)
            .collect())
    }
}
