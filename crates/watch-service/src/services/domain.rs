//! Domain registry service
//!
//! List, add, remove, and manually check monitored domains. Every mutation
//! returns the refreshed domain list plus a live account summary, matching
//! what the dashboard renders after each action.

use tracing::{info, instrument, warn};
use watch_core::entities::MonitoredDomain;
use watch_core::traits::{DomainRepository, LedgerRepository, SettleOutcome, UserRepository};
use watch_core::{DomainError, Snowflake, User};
use watch_oracle::StatusOracle;

use crate::dto::{
    AddDomainRequest, CheckHistoryResponse, DomainHistoryResponse, DomainListResponse,
    DomainResponse, IntervalOption, UserInfo,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// History entries returned per domain
const HISTORY_LIMIT: i64 = 20;

/// Domain registry service
pub struct DomainService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DomainService<'a> {
    /// Create a new DomainService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all domains for a user with a live account snapshot
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<DomainListResponse> {
        self.list_with_message(user_id, None).await
    }

    /// Add a domain; charges one credit immediately, before any check runs
    #[instrument(skip(self, request), fields(domain = %request.domain))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        request: AddDomainRequest,
    ) -> ServiceResult<DomainListResponse> {
        // Pre-check gate: the caller must hold at least one credit at entry
        self.ensure_can_afford(user_id, 1).await?;

        if self.ctx.domain_repo().exists(user_id, &request.domain).await? {
            return Err(DomainError::DomainAlreadyMonitored(request.domain).into());
        }

        let interval = request.interval();
        let domain = MonitoredDomain::new(
            self.ctx.generate_id(),
            user_id,
            request.domain,
            interval,
        );

        // Insert and deduct the initial credit in one transaction
        self.ctx.domain_repo().insert_charging_owner(&domain).await?;

        info!(user_id = %user_id, domain = %domain.domain, "Domain added");

        self.list_with_message(user_id, Some("Domain added successfully")).await
    }

    /// Remove a domain; no refund for credits already spent
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        user_id: Snowflake,
        domain_id: Snowflake,
    ) -> ServiceResult<DomainListResponse> {
        let domain = self.find_owned(user_id, domain_id).await?;

        self.ctx.domain_repo().delete(domain.id).await?;

        info!(user_id = %user_id, domain = %domain.domain, "Domain removed");

        self.list_with_message(user_id, Some("Domain removed successfully")).await
    }

    /// Manually check one domain right now
    ///
    /// Calls the oracle for the single domain, treating any oracle failure as
    /// "not blocked", then settles status, deduction, and history atomically.
    #[instrument(skip(self))]
    pub async fn check(
        &self,
        user_id: Snowflake,
        domain_id: Snowflake,
    ) -> ServiceResult<DomainListResponse> {
        // Pre-check gate, independent of the settle-time sufficiency check
        self.ensure_can_afford(user_id, 1).await?;

        let domain = self.find_owned(user_id, domain_id).await?;

        let blocked = match self.ctx.oracle().check_domain(&domain.domain).await {
            Ok(blocked) => blocked,
            Err(e) => {
                // Fail open: an unreachable oracle reads as not blocked
                warn!(domain = %domain.domain, error = %e, "Oracle check failed, assuming not blocked");
                false
            }
        };

        let outcome = self
            .ctx
            .domain_repo()
            .settle_check(domain.id, domain.last_checked, blocked, self.ctx.generate_id())
            .await?;

        match outcome {
            SettleOutcome::Settled => {
                info!(domain = %domain.domain, blocked, "Domain checked");
            }
            SettleOutcome::Superseded => {
                // A concurrent check settled first; the fresh listing below
                // already reflects it
                warn!(domain = %domain.domain, "Manual check superseded by a concurrent settle");
            }
            SettleOutcome::InsufficientCredits => {
                return Err(DomainError::InsufficientCredits.into());
            }
        }

        self.list_with_message(user_id, Some("Domain checked successfully")).await
    }

    /// Recent check history for one owned domain
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        user_id: Snowflake,
        domain_id: Snowflake,
    ) -> ServiceResult<DomainHistoryResponse> {
        let domain = self.find_owned(user_id, domain_id).await?;

        let history = self
            .ctx
            .ledger_repo()
            .history_for_domain(domain.id, HISTORY_LIMIT)
            .await?;

        Ok(DomainHistoryResponse {
            domain: DomainResponse::from(&domain),
            history: history.iter().map(CheckHistoryResponse::from).collect(),
        })
    }

    /// Fail unless the user's balance covers `cost`
    async fn ensure_can_afford(&self, user_id: Snowflake, cost: i64) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !user.can_afford(cost) {
            return Err(DomainError::InsufficientCredits.into());
        }
        Ok(user)
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn find_owned(
        &self,
        user_id: Snowflake,
        domain_id: Snowflake,
    ) -> ServiceResult<MonitoredDomain> {
        self.ctx
            .domain_repo()
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Domain", domain_id.to_string()))
    }

    async fn list_with_message(
        &self,
        user_id: Snowflake,
        message: Option<&'static str>,
    ) -> ServiceResult<DomainListResponse> {
        let user = self.require_user(user_id).await?;
        let domains = self.ctx.domain_repo().list_for_user(user_id).await?;

        Ok(DomainListResponse {
            message,
            domains: domains.iter().map(DomainResponse::from).collect(),
            user_info: UserInfo::from(&user),
            valid_intervals: IntervalOption::table(),
        })
    }
}
