//! PostgreSQL implementation of DomainRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use watch_core::entities::MonitoredDomain;
use watch_core::error::DomainError;
use watch_core::traits::{DomainRepository, DueDomain, RepoResult, SettleOutcome};
use watch_core::value_objects::Snowflake;

use crate::models::{DomainModel, DueDomainModel};

use super::error::{domain_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of DomainRepository
#[derive(Clone)]
pub struct PgDomainRepository {
    pool: PgPool,
}

impl PgDomainRepository {
    /// Create a new PgDomainRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    #[instrument(skip(self))]
    async fn find_owned(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<MonitoredDomain>> {
        let result = sqlx::query_as::<_, DomainModel>(
            r"
            SELECT id, user_id, domain, status, check_interval,
                   credits_per_check, last_checked, created_at
            FROM monitored_domains
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MonitoredDomain::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<MonitoredDomain>> {
        let result = sqlx::query_as::<_, DomainModel>(
            r"
            SELECT id, user_id, domain, status, check_interval,
                   credits_per_check, last_checked, created_at
            FROM monitored_domains
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(MonitoredDomain::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, domain: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM monitored_domains WHERE user_id = $1 AND domain = $2)
            ",
        )
        .bind(user_id.into_inner())
        .bind(domain)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, domain), fields(domain = %domain.domain))]
    async fn insert_charging_owner(&self, domain: &MonitoredDomain) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Charge the initial credit first; the condition keeps the balance at zero or above
        let charged = sqlx::query(
            r"
            UPDATE users
            SET credits = credits - $2, updated_at = NOW()
            WHERE id = $1 AND credits >= $2
            ",
        )
        .bind(domain.user_id.into_inner())
        .bind(domain.credits_per_check)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if charged.rows_affected() == 0 {
            let owner_exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
                ",
            )
            .bind(domain.user_id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            tx.rollback().await.map_err(map_db_error)?;
            return Err(if owner_exists {
                DomainError::InsufficientCredits
            } else {
                DomainError::UserNotFound(domain.user_id)
            });
        }

        sqlx::query(
            r"
            INSERT INTO monitored_domains (id, user_id, domain, status, check_interval,
                                           credits_per_check, last_checked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(domain.id.into_inner())
        .bind(domain.user_id.into_inner())
        .bind(&domain.domain)
        .bind(domain.status)
        .bind(domain.check_interval.seconds())
        .bind(domain.credits_per_check)
        .bind(domain.last_checked)
        .bind(domain.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, |_| DomainError::DomainAlreadyMonitored(domain.domain.clone()))
        })?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM monitored_domains WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(domain_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM monitored_domains WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn due_domains(&self) -> RepoResult<Vec<DueDomain>> {
        let result = sqlx::query_as::<_, DueDomainModel>(
            r"
            SELECT d.id, d.user_id, d.domain, d.status, d.check_interval,
                   d.credits_per_check, d.last_checked, d.created_at,
                   u.credits AS owner_credits
            FROM monitored_domains d
            JOIN users u ON d.user_id = u.id
            WHERE (d.last_checked IS NULL
                   OR d.last_checked + make_interval(secs => d.check_interval::double precision) <= NOW())
              AND u.credits >= d.credits_per_check
            ORDER BY d.last_checked ASC NULLS FIRST
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(DueDomain::from).collect())
    }

    #[instrument(skip(self))]
    async fn settle_check(
        &self,
        id: Snowflake,
        expected_last_checked: Option<DateTime<Utc>>,
        blocked: bool,
        history_id: Snowflake,
    ) -> RepoResult<SettleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the row so concurrent settles serialize on it
        let locked = sqlx::query_as::<_, (i64, i64, Option<DateTime<Utc>>)>(
            r"
            SELECT user_id, credits_per_check, last_checked
            FROM monitored_domains
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some((owner_id, cost, last_checked)) = locked else {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(domain_not_found(id));
        };

        // Optimistic guard: another settle already advanced last_checked
        if last_checked != expected_last_checked {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(SettleOutcome::Superseded);
        }

        // Conditional deduction keeps the balance at zero or above
        let charged = sqlx::query(
            r"
            UPDATE users
            SET credits = credits - $2, updated_at = NOW()
            WHERE id = $1 AND credits >= $2
            ",
        )
        .bind(owner_id)
        .bind(cost)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if charged.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(SettleOutcome::InsufficientCredits);
        }

        sqlx::query(
            r"
            UPDATE monitored_domains
            SET status = $2, last_checked = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(blocked)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO domain_history (id, domain_id, status, credits_used, checked_at)
            VALUES ($1, $2, $3, $4, NOW())
            ",
        )
        .bind(history_id.into_inner())
        .bind(id.into_inner())
        .bind(blocked)
        .bind(cost)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(SettleOutcome::Settled)
    }
}
