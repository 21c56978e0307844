//! Question bank record as delivered by the remote source and cached
//! locally.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// One multiple-choice question from the remote bank.
///
/// Cached verbatim; the core never edits individual questions, it only
/// replaces the whole cached dataset on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Identifier assigned by the remote source.
    pub id: i64,
    pub category: String,
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index into `choices` for the correct answer.
    pub answer_index: u32,
}

impl QuestionRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.answer_index as usize >= self.choices.len() {
            return Err(ValidationError::AnswerIndexOutOfRange {
                index: self.answer_index,
                choice_count: self.choices.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionRecord;
    use crate::model::ValidationError;

    #[test]
    fn answer_index_must_point_at_a_choice() {
        let record = QuestionRecord {
            id: 1,
            category: "geography".to_string(),
            prompt: "Capital of France?".to_string(),
            choices: vec!["Paris".to_string(), "Lyon".to_string()],
            answer_index: 2,
        };
        assert_eq!(
            record.validate(),
            Err(ValidationError::AnswerIndexOutOfRange {
                index: 2,
                choice_count: 2
            })
        );
    }
}
