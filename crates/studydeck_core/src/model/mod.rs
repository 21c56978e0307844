//! Domain models for todos, quiz history, badges, and the cached
//! question bank.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Reject malformed input before it reaches storage.
//!
//! # Invariants
//! - Every persisted record is identified by an integer id assigned on
//!   creation and unique within its collection.
//! - Validation failures never leave partial state behind.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod badge;
pub mod question;
pub mod quiz;
pub mod task;

/// Input validation error shared by all write paths.
///
/// Raised before any SQL mutation; a failed validation has no side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// A partial update carries no fields at all.
    EmptyPatch,
    /// Quiz category is empty or whitespace-only.
    EmptyCategory,
    /// Quiz attempt total must be strictly positive.
    NonPositiveTotal { total: u32 },
    /// Quiz attempt score cannot exceed its total.
    ScoreExceedsTotal { score: u32, total: u32 },
    /// Question prompt is empty or whitespace-only.
    EmptyPrompt,
    /// Question answer index points outside its choice list.
    AnswerIndexOutOfRange { index: u32, choice_count: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyPatch => write!(f, "task patch must set at least one field"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::NonPositiveTotal { total } => {
                write!(f, "attempt total must be positive, got {total}")
            }
            Self::ScoreExceedsTotal { score, total } => {
                write!(f, "attempt score {score} exceeds total {total}")
            }
            Self::EmptyPrompt => write!(f, "question prompt must not be empty"),
            Self::AnswerIndexOutOfRange {
                index,
                choice_count,
            } => write!(
                f,
                "answer index {index} is outside {choice_count} available choices"
            ),
        }
    }
}

impl Error for ValidationError {}
