//! CheckHistoryEntry entity - append-only record of one completed check

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One completed check of a monitored domain
///
/// Written exactly once per settled check, in the same transaction as the
/// status write and the credit deduction. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckHistoryEntry {
    pub id: Snowflake,
    pub domain_id: Snowflake,
    pub status: bool,
    pub credits_used: i64,
    pub checked_at: DateTime<Utc>,
}
