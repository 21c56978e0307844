//! Daily challenge marker repository.
//!
//! # Responsibility
//! - Persist the single fact recording the last calendar date on which the
//!   daily challenge was completed.
//!
//! # Invariants
//! - The marker is a singleton row (`id = 0`, CHECK'd by the schema).
//! - Advancement is a single compare-and-set statement, so exactly one
//!   caller per calendar date can observe a grant, across restarts.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::repo::RepoResult;

/// Repository interface for the daily challenge marker.
pub trait ChallengeMarkerRepository {
    /// Date of the last accepted challenge completion, if any.
    fn last_completion_date(&self) -> RepoResult<Option<NaiveDate>>;
    /// Moves the marker to `today` iff it is absent or strictly earlier.
    ///
    /// Returns `true` when the marker advanced (the grant), `false` when
    /// `today` was already consumed or lies behind the marker.
    fn try_advance(&self, today: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed marker repository.
pub struct SqliteChallengeMarkerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChallengeMarkerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChallengeMarkerRepository for SqliteChallengeMarkerRepository<'_> {
    fn last_completion_date(&self) -> RepoResult<Option<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT last_completion_date FROM daily_challenge_marker WHERE id = 0;")?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn try_advance(&self, today: NaiveDate) -> RepoResult<bool> {
        // ISO-8601 dates compare lexicographically, so the TEXT comparison
        // below is a chronological one.
        let changed = self.conn.execute(
            "INSERT INTO daily_challenge_marker (id, last_completion_date)
             VALUES (0, ?1)
             ON CONFLICT(id) DO UPDATE SET
                 last_completion_date = excluded.last_completion_date
             WHERE daily_challenge_marker.last_completion_date
                 < excluded.last_completion_date;",
            params![today],
        )?;

        Ok(changed > 0)
    }
}
