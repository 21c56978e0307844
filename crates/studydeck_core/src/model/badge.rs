//! Badge achievement record.

use serde::{Deserialize, Serialize};

/// A one-time achievement keyed by name.
///
/// Awarding is monotonic: once a name exists it is never revoked, and the
/// schema guarantees at most one row per name for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    /// Unix epoch milliseconds, stamped at the award.
    pub awarded_at: i64,
}
