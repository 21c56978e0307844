//! Quiz history and badge repository.
//!
//! # Responsibility
//! - Persist immutable quiz attempts for aggregate scoring.
//! - Persist badge awards with a structural at-most-once guarantee.
//!
//! # Invariants
//! - Attempts are append-only; no update or per-row delete API exists.
//! - `badges.name` is the primary key, so a second award of the same name
//!   cannot create a row regardless of caller logic.

use crate::model::badge::Badge;
use crate::model::quiz::{AttemptDraft, QuizAttempt};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ATTEMPT_SELECT_SQL: &str = "SELECT
    id,
    category,
    score,
    total,
    completed_at
FROM quiz_attempts";

/// Repository interface for quiz attempts and badges.
pub trait QuizRepository {
    /// Validates and appends one attempt, returning the stored row.
    fn record_attempt(&self, draft: &AttemptDraft) -> RepoResult<QuizAttempt>;
    /// All attempts in completion order.
    fn list_attempts(&self) -> RepoResult<Vec<QuizAttempt>>;
    /// Cumulative number of attempts ever recorded.
    fn attempts_total(&self) -> RepoResult<u64>;
    /// All awarded badges in award order.
    fn list_badges(&self) -> RepoResult<Vec<Badge>>;
    /// Awards a badge once; returns `None` when the name already exists.
    fn award_badge(&self, name: &str) -> RepoResult<Option<Badge>>;
}

/// SQLite-backed quiz repository.
pub struct SqliteQuizRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuizRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn get_attempt(&self, id: i64) -> RepoResult<QuizAttempt> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATTEMPT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_attempt_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn get_badge(&self, name: &str) -> RepoResult<Option<Badge>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, awarded_at FROM badges WHERE name = ?1;")?;
        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_badge_row(row)?));
        }
        Ok(None)
    }
}

impl QuizRepository for SqliteQuizRepository<'_> {
    fn record_attempt(&self, draft: &AttemptDraft) -> RepoResult<QuizAttempt> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO quiz_attempts (category, score, total) VALUES (?1, ?2, ?3);",
            params![draft.category.as_str(), draft.score, draft.total],
        )?;

        self.get_attempt(self.conn.last_insert_rowid())
    }

    fn list_attempts(&self) -> RepoResult<Vec<QuizAttempt>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATTEMPT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut attempts = Vec::new();

        while let Some(row) = rows.next()? {
            attempts.push(parse_attempt_row(row)?);
        }

        Ok(attempts)
    }

    fn attempts_total(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM quiz_attempts;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn list_badges(&self) -> RepoResult<Vec<Badge>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, awarded_at FROM badges ORDER BY awarded_at ASC, name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut badges = Vec::new();

        while let Some(row) = rows.next()? {
            badges.push(parse_badge_row(row)?);
        }

        Ok(badges)
    }

    fn award_badge(&self, name: &str) -> RepoResult<Option<Badge>> {
        let changed = self.conn.execute(
            "INSERT INTO badges (name) VALUES (?1) ON CONFLICT(name) DO NOTHING;",
            params![name],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        self.get_badge(name)
    }
}

fn parse_attempt_row(row: &Row<'_>) -> RepoResult<QuizAttempt> {
    let score: i64 = row.get("score")?;
    let total: i64 = row.get("total")?;
    let score = u32::try_from(score).map_err(|_| {
        RepoError::InvalidData(format!("invalid score `{score}` in quiz_attempts.score"))
    })?;
    let total = u32::try_from(total).map_err(|_| {
        RepoError::InvalidData(format!("invalid total `{total}` in quiz_attempts.total"))
    })?;

    let attempt = QuizAttempt {
        id: row.get("id")?,
        category: row.get("category")?,
        score,
        total,
        completed_at: row.get("completed_at")?,
    };

    if attempt.total == 0 || attempt.score > attempt.total {
        return Err(RepoError::InvalidData(format!(
            "inconsistent attempt score {}/{} in quiz_attempts",
            attempt.score, attempt.total
        )));
    }

    Ok(attempt)
}

fn parse_badge_row(row: &Row<'_>) -> RepoResult<Badge> {
    Ok(Badge {
        name: row.get("name")?,
        awarded_at: row.get("awarded_at")?,
    })
}
