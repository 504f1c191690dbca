//! CreditTransaction entity - append-only ledger of balance adjustments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Direction of a credit adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Add,
    Subtract,
}

impl TransactionKind {
    /// Kind implied by a signed balance delta
    #[must_use]
    pub const fn from_delta(delta: i64) -> Self {
        if delta >= 0 {
            Self::Add
        } else {
            Self::Subtract
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One balance adjustment outside the per-check deduction path
///
/// Written whenever an admin changes a balance; the amount is stored as an
/// absolute value with the direction in `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditTransaction {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub amount: i64,
    pub kind: TransactionKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
