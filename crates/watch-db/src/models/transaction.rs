//! Credit transaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for credit_transactions table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub transaction_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
