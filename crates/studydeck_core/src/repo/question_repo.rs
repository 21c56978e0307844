//! Cached question bank and sync metadata repository.
//!
//! # Responsibility
//! - Persist the question dataset delivered by the remote source.
//! - Track when the cache was last refreshed.
//!
//! # Invariants
//! - Dataset replacement is all-or-nothing: cached rows and
//!   `last_fetched_at` move together inside one transaction, so an
//!   abandoned or failed refresh leaves the previous cache intact.
//! - Cached rows preserve the order in which the source delivered them.

use crate::model::question::QuestionRecord;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// `sync_meta` key for the cached question dataset.
pub const QUESTION_BANK_META_KEY: &str = "questionBank";

/// Repository interface for the cached question bank.
pub trait QuestionBankRepository {
    /// Cached records in delivery order; empty when never populated.
    fn load_questions(&self) -> RepoResult<Vec<QuestionRecord>>;
    /// Epoch-ms timestamp of the last successful refresh, if any.
    fn last_fetched_at(&self) -> RepoResult<Option<i64>>;
    /// Atomically replaces the cache and stamps `last_fetched_at`.
    fn replace_questions(&self, records: &[QuestionRecord], fetched_at_ms: i64) -> RepoResult<()>;
}

/// SQLite-backed question bank repository.
pub struct SqliteQuestionBankRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionBankRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuestionBankRepository for SqliteQuestionBankRepository<'_> {
    fn load_questions(&self) -> RepoResult<Vec<QuestionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT question_id, category, prompt, choices, answer_index
             FROM question_bank
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_question_row(row)?);
        }

        Ok(records)
    }

    fn last_fetched_at(&self) -> RepoResult<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT last_fetched_at FROM sync_meta WHERE key = ?1;")?;
        let mut rows = stmt.query(params![QUESTION_BANK_META_KEY])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn replace_questions(&self, records: &[QuestionRecord], fetched_at_ms: i64) -> RepoResult<()> {
        for record in records {
            record.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM question_bank;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO question_bank (question_id, category, prompt, choices, answer_index)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for record in records {
                let choices = serde_json::to_string(&record.choices).map_err(|err| {
                    RepoError::InvalidData(format!("unencodable question choices: {err}"))
                })?;
                insert.execute(params![
                    record.id,
                    record.category.as_str(),
                    record.prompt.as_str(),
                    choices,
                    record.answer_index,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO sync_meta (key, last_fetched_at) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET last_fetched_at = excluded.last_fetched_at;",
            params![QUESTION_BANK_META_KEY, fetched_at_ms],
        )?;

        tx.commit()?;
        Ok(())
    }
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<QuestionRecord> {
    let choices_text: String = row.get("choices")?;
    let choices: Vec<String> = serde_json::from_str(&choices_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid choices payload `{choices_text}` in question_bank.choices"
        ))
    })?;

    let answer_index: i64 = row.get("answer_index")?;
    let answer_index = u32::try_from(answer_index).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid answer index `{answer_index}` in question_bank.answer_index"
        ))
    })?;

    Ok(QuestionRecord {
        id: row.get("question_id")?,
        category: row.get("category")?,
        prompt: row.get("prompt")?,
        choices,
        answer_index,
    })
}
