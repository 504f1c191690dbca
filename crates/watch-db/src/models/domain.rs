//! Monitored domain database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for monitored_domains table
#[derive(Debug, Clone, FromRow)]
pub struct DomainModel {
    pub id: i64,
    pub user_id: i64,
    pub domain: String,
    pub status: Option<bool>,
    pub check_interval: i32,
    pub credits_per_check: i64,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A due domain joined with its owner's live credit balance
///
/// Produced by the eligibility query of the check cycle engine.
#[derive(Debug, Clone, FromRow)]
pub struct DueDomainModel {
    #[sqlx(flatten)]
    pub domain: DomainModel,
    pub owner_credits: i64,
}
