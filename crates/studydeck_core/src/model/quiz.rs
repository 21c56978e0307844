//! Quiz attempt domain model.
//!
//! # Responsibility
//! - Define the immutable per-session attempt record.
//!
//! # Invariants
//! - An attempt is written once when a quiz session finishes and never
//!   mutated or individually deleted afterwards.
//! - `score <= total` and `total > 0` hold for every persisted row.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// One finished quiz session, kept forever as aggregate history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub category: String,
    pub score: u32,
    pub total: u32,
    /// Unix epoch milliseconds, stamped at creation.
    pub completed_at: i64,
}

impl QuizAttempt {
    /// Fraction of questions answered correctly, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        f64::from(self.score) / f64::from(self.total)
    }
}

/// Input shape for recording a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptDraft {
    pub category: String,
    pub score: u32,
    pub total: u32,
}

impl AttemptDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.total == 0 {
            return Err(ValidationError::NonPositiveTotal { total: self.total });
        }
        if self.score > self.total {
            return Err(ValidationError::ScoreExceedsTotal {
                score: self.score,
                total: self.total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AttemptDraft;
    use crate::model::ValidationError;

    #[test]
    fn zero_total_fails_validation() {
        let draft = AttemptDraft {
            category: "history".to_string(),
            score: 0,
            total: 0,
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NonPositiveTotal { total: 0 })
        );
    }

    #[test]
    fn score_above_total_fails_validation() {
        let draft = AttemptDraft {
            category: "history".to_string(),
            score: 6,
            total: 5,
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::ScoreExceedsTotal { score: 6, total: 5 })
        );
    }

    #[test]
    fn perfect_score_is_valid() {
        let draft = AttemptDraft {
            category: "history".to_string(),
            score: 5,
            total: 5,
        };
        assert!(draft.validate().is_ok());
    }
}
