//! Admin service
//!
//! Privileged operations: user management, credit grants, API token
//! lifecycle, statistics, and checks on behalf of any user.

use chrono::Utc;
use tracing::{info, instrument, warn};
use watch_common::auth::generate_api_token;
use watch_core::entities::{CreditTransaction, TransactionKind};
use watch_core::traits::{DomainRepository, LedgerRepository, SettleOutcome, UserRepository};
use watch_core::{Snowflake, User};
use watch_oracle::StatusOracle;

use crate::dto::{
    AccountResponse, AddCreditsRequest, AddCreditsResponse, AdminUserListResponse,
    AdminUserResponse, AdminUserUpdateRequest, ApiTokenResponse, DomainResponse,
    TransactionResponse, UserDomainsResponse, UserStats, UserStatsResponse, UserSummary,
    UserUpdateResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Transactions shown in per-user statistics
const RECENT_TRANSACTIONS: i64 = 10;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every managed user (admins excluded) with their domains
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<AdminUserListResponse> {
        let users = self.ctx.user_repo().list_non_admins().await?;

        let mut result = Vec::with_capacity(users.len());
        for user in &users {
            let domains = self.ctx.domain_repo().list_for_user(user.id).await?;
            result.push(AdminUserResponse {
                account: AccountResponse::from(user),
                domains: domains.iter().map(DomainResponse::from).collect(),
            });
        }

        Ok(AdminUserListResponse { users: result })
    }

    /// One user's domains
    #[instrument(skip(self))]
    pub async fn user_domains(&self, user_id: Snowflake) -> ServiceResult<UserDomainsResponse> {
        let user = self.require_user(user_id).await?;
        let domains = self.ctx.domain_repo().list_for_user(user_id).await?;

        Ok(UserDomainsResponse {
            user: UserSummary::from(&user),
            domains: domains.iter().map(DomainResponse::from).collect(),
        })
    }

    /// Apply a typed field update to a user account
    ///
    /// A change to the credit field is logged to the transaction ledger as an
    /// admin adjustment.
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: Snowflake,
        request: AdminUserUpdateRequest,
    ) -> ServiceResult<UserUpdateResponse> {
        if request.is_empty() {
            return Err(ServiceError::validation("No valid update fields provided"));
        }

        let before = self.require_user(user_id).await?;

        let patch = watch_core::traits::AccountPatch {
            credits: request.credits,
            api_calls_limit: request.api_calls_limit,
            is_active: request.is_active,
        };
        let updated = self.ctx.user_repo().apply_patch(user_id, &patch).await?;

        if let Some(new_credits) = request.credits {
            let delta = new_credits - before.credits;
            if delta != 0 {
                self.record_adjustment(user_id, delta, "Admin adjustment").await?;
            }
        }

        info!(user_id = %user_id, "User updated by admin");

        Ok(UserUpdateResponse {
            message: "User updated successfully",
            user: AccountResponse::from(&updated),
        })
    }

    /// Grant credits to a user
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn add_credits(
        &self,
        user_id: Snowflake,
        request: AddCreditsRequest,
    ) -> ServiceResult<AddCreditsResponse> {
        let credits = self.ctx.user_repo().add_credits(user_id, request.amount).await?;
        self.record_adjustment(user_id, request.amount, "Admin credit addition")
            .await?;

        info!(user_id = %user_id, amount = request.amount, "Credits added");

        Ok(AddCreditsResponse {
            message: "Credits added successfully",
            credits,
        })
    }

    /// Per-user statistics: domain count and recent ledger entries
    #[instrument(skip(self))]
    pub async fn user_stats(&self, user_id: Snowflake) -> ServiceResult<UserStatsResponse> {
        let user = self.require_user(user_id).await?;
        let domain_count = self.ctx.domain_repo().count_for_user(user_id).await?;
        let transactions = self
            .ctx
            .ledger_repo()
            .recent_transactions(user_id, RECENT_TRANSACTIONS)
            .await?;

        Ok(UserStatsResponse {
            user: AccountResponse::from(&user),
            stats: UserStats {
                domain_count,
                recent_transactions: transactions.iter().map(TransactionResponse::from).collect(),
            },
        })
    }

    /// Issue a fresh API token and restart the user's quota window
    #[instrument(skip(self))]
    pub async fn issue_api_token(&self, user_id: Snowflake) -> ServiceResult<ApiTokenResponse> {
        self.require_user(user_id).await?;

        let token = generate_api_token();
        let reset_at = Utc::now() + self.ctx.quota_window();
        self.ctx.user_repo().issue_api_token(user_id, &token, reset_at).await?;

        info!(user_id = %user_id, "API token issued by admin");

        Ok(ApiTokenResponse { api_token: token })
    }

    /// Revoke the user's API token
    #[instrument(skip(self))]
    pub async fn revoke_api_token(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().clear_api_token(user_id).await?;
        info!(user_id = %user_id, "API token revoked");
        Ok(())
    }

    /// Check one of a user's domains on their behalf, charging the owner
    #[instrument(skip(self))]
    pub async fn check_user_domain(
        &self,
        user_id: Snowflake,
        domain_id: Snowflake,
    ) -> ServiceResult<UserDomainsResponse> {
        let domain = self
            .ctx
            .domain_repo()
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Domain", domain_id.to_string()))?;

        let blocked = match self.ctx.oracle().check_domain(&domain.domain).await {
            Ok(blocked) => blocked,
            Err(e) => {
                warn!(domain = %domain.domain, error = %e, "Oracle check failed, assuming not blocked");
                false
            }
        };

        let outcome = self
            .ctx
            .domain_repo()
            .settle_check(domain.id, domain.last_checked, blocked, self.ctx.generate_id())
            .await?;

        if outcome == SettleOutcome::InsufficientCredits {
            return Err(watch_core::DomainError::InsufficientCredits.into());
        }

        self.user_domains(user_id).await
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn record_adjustment(
        &self,
        user_id: Snowflake,
        delta: i64,
        reason: &str,
    ) -> ServiceResult<()> {
        let transaction = CreditTransaction {
            id: self.ctx.generate_id(),
            user_id,
            amount: delta.abs(),
            kind: TransactionKind::from_delta(delta),
            reason: reason.to_string(),
            created_at: Utc::now(),
        };
        self.ctx.ledger_repo().record_transaction(&transaction).await?;
        Ok(())
    }
}
