//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{CheckHistoryEntry, CreditTransaction, MonitoredDomain, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Typed admin update of account fields
///
/// Every updatable field is named; absent fields are left untouched. This is
/// the whole allow-list - there is no dynamic field filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub credits: Option<i64>,
    pub api_calls_limit: Option<i64>,
    pub is_active: Option<bool>,
}

impl AccountPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.credits.is_none() && self.api_calls_limit.is_none() && self.is_active.is_none()
    }
}

/// A domain eligible for an automatic check, joined with its owner's balance
#[derive(Debug, Clone)]
pub struct DueDomain {
    pub domain: MonitoredDomain,
    pub owner_credits: i64,
}

/// Result of an atomic check settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Status written, owner charged, history appended
    Settled,
    /// `last_checked` no longer matched - a concurrent settle won the race
    Superseded,
    /// Owner balance dropped below the per-check cost since selection
    InsufficientCredits,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find an active user by API token
    async fn find_by_api_token(&self, token: &str) -> RepoResult<Option<User>>;

    /// Check whether the username or email is already taken
    async fn identity_taken(&self, username: &str, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Store a freshly generated API token (self-service path; counters untouched)
    async fn set_api_token(&self, id: Snowflake, token: &str) -> RepoResult<()>;

    /// Store a new API token and restart the quota window (admin issuance)
    async fn issue_api_token(
        &self,
        id: Snowflake,
        token: &str,
        reset_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Revoke the API token
    async fn clear_api_token(&self, id: Snowflake) -> RepoResult<()>;

    /// Apply a typed field patch and return the updated user
    async fn apply_patch(&self, id: Snowflake, patch: &AccountPatch) -> RepoResult<User>;

    /// Add credits to the balance and return the new balance
    async fn add_credits(&self, id: Snowflake, amount: i64) -> RepoResult<i64>;

    /// List every non-admin account
    async fn list_non_admins(&self) -> RepoResult<Vec<User>>;

    /// Zero the API call counter and advance the reset deadline
    async fn reset_quota_window(&self, id: Snowflake, reset_at: DateTime<Utc>) -> RepoResult<()>;

    /// Count one accepted API call against the quota
    async fn increment_api_calls(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Domain Repository
// ============================================================================

#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Find a domain by ID, scoped to its owner
    async fn find_owned(&self, id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<MonitoredDomain>>;

    /// List all domains for a user
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<MonitoredDomain>>;

    /// Check whether the user already monitors this domain name
    async fn exists(&self, user_id: Snowflake, domain: &str) -> RepoResult<bool>;

    /// Insert a new domain and charge the owner the initial credit, atomically
    ///
    /// Fails with `InsufficientCredits` when the owner cannot cover the charge
    /// and `DomainAlreadyMonitored` on a (user, domain) conflict.
    async fn insert_charging_owner(&self, domain: &MonitoredDomain) -> RepoResult<()>;

    /// Delete a domain (history cascades); no refund
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Count domains for a user
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Select every domain due for an automatic check whose owner can pay
    async fn due_domains(&self) -> RepoResult<Vec<DueDomain>>;

    /// Atomically settle one completed check
    ///
    /// In a single transaction: write `status`/`last_checked` guarded by the
    /// previously observed `last_checked` value, deduct the per-check cost
    /// from the owner (conditional on a sufficient balance), and append the
    /// history row under `history_id`.
    async fn settle_check(
        &self,
        id: Snowflake,
        expected_last_checked: Option<DateTime<Utc>>,
        blocked: bool,
        history_id: Snowflake,
    ) -> RepoResult<SettleOutcome>;
}

// ============================================================================
// Ledger Repository
// ============================================================================

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Append a credit transaction
    async fn record_transaction(&self, transaction: &CreditTransaction) -> RepoResult<()>;

    /// Most recent credit transactions for a user, newest first
    async fn recent_transactions(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<CreditTransaction>>;

    /// Most recent check history for a domain, newest first
    async fn history_for_domain(
        &self,
        domain_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<CheckHistoryEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_patch_is_empty() {
        assert!(AccountPatch::default().is_empty());
        assert!(!AccountPatch {
            credits: Some(50),
            ..Default::default()
        }
        .is_empty());
        assert!(!AccountPatch {
            is_active: Some(false),
            ..Default::default()
        }
        .is_empty());
    }
}
