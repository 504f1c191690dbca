//! Check history database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for domain_history table
#[derive(Debug, Clone, FromRow)]
pub struct CheckRecordModel {
    pub id: i64,
    pub domain_id: i64,
    pub status: bool,
    pub credits_used: i64,
    pub checked_at: DateTime<Utc>,
}
