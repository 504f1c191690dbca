//! PostgreSQL implementation of LedgerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use watch_core::entities::{CheckHistoryEntry, CreditTransaction};
use watch_core::traits::{LedgerRepository, RepoResult};
use watch_core::value_objects::Snowflake;

use crate::models::{CheckRecordModel, TransactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of LedgerRepository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new PgLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    #[instrument(skip(self, transaction), fields(user_id = %transaction.user_id))]
    async fn record_transaction(&self, transaction: &CreditTransaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO credit_transactions (id, user_id, amount, transaction_type, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(transaction.user_id.into_inner())
        .bind(transaction.amount)
        .bind(transaction.kind.as_str())
        .bind(&transaction.reason)
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent_transactions(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<CreditTransaction>> {
        let result = sqlx::query_as::<_, TransactionModel>(
            r"
            SELECT id, user_id, amount, transaction_type, description, created_at
            FROM credit_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(CreditTransaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn history_for_domain(
        &self,
        domain_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<CheckHistoryEntry>> {
        let result = sqlx::query_as::<_, CheckRecordModel>(
            r"
            SELECT id, domain_id, status, credits_used, checked_at
            FROM domain_history
            WHERE domain_id = $1
            ORDER BY checked_at DESC
            LIMIT $2
            ",
        )
        .bind(domain_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(CheckHistoryEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLedgerRepository>();
    }
}
