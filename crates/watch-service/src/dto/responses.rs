//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use watch_core::{Role, TransactionKind};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with the session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Current authenticated user response (includes email and API token)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub credits: i64,
    pub api_calls_limit: i64,
    pub api_calls_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Domain Responses
// ============================================================================

/// A monitored domain annotated with its human-readable interval label
#[derive(Debug, Clone, Serialize)]
pub struct DomainResponse {
    pub id: String,
    pub domain: String,
    /// Blocked flag from the last completed check; null until first checked
    pub status: Option<bool>,
    /// Interval in seconds
    pub check_interval: i32,
    /// Interval label from the fixed table
    pub interval_label: &'static str,
    pub credits_per_check: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Live snapshot of the owner's credit and quota state
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub credits: i64,
    pub api_calls_count: i64,
    pub api_calls_limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// One entry of the fixed interval table
#[derive(Debug, Clone, Serialize)]
pub struct IntervalOption {
    pub label: &'static str,
    pub value: i32,
}

/// Domain list with account summary, returned by every registry operation
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub domains: Vec<DomainResponse>,
    pub user_info: UserInfo,
    pub valid_intervals: Vec<IntervalOption>,
}

/// One completed check of a domain
#[derive(Debug, Clone, Serialize)]
pub struct CheckHistoryResponse {
    pub id: String,
    pub status: bool,
    pub credits_used: i64,
    pub checked_at: DateTime<Utc>,
}

/// Recent check history for one domain, newest first
#[derive(Debug, Serialize)]
pub struct DomainHistoryResponse {
    pub domain: DomainResponse,
    pub history: Vec<CheckHistoryResponse>,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Account fields visible to admins (no credential hash, no token)
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub credits: i64,
    pub api_calls_limit: i64,
    pub api_calls_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One managed user with their monitored domains
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub domains: Vec<DomainResponse>,
}

/// Bulk user listing
#[derive(Debug, Serialize)]
pub struct AdminUserListResponse {
    pub users: Vec<AdminUserResponse>,
}

/// Short owner summary for per-user domain listings
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub credits: i64,
}

/// One user's domains, admin view
#[derive(Debug, Serialize)]
pub struct UserDomainsResponse {
    pub user: UserSummary,
    pub domains: Vec<DomainResponse>,
}

/// Result of a typed admin update
#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: &'static str,
    pub user: AccountResponse,
}

/// Result of an admin credit grant
#[derive(Debug, Serialize)]
pub struct AddCreditsResponse {
    pub message: &'static str,
    pub credits: i64,
}

/// One credit ledger entry
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub amount: i64,
    pub kind: TransactionKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Per-user statistics block
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub domain_count: i64,
    pub recent_transactions: Vec<TransactionResponse>,
}

/// Per-user statistics, admin view
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub user: AccountResponse,
    pub stats: UserStats,
}

/// A freshly issued API token
#[derive(Debug, Serialize)]
pub struct ApiTokenResponse {
    pub api_token: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe payload with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ok" } else { "degraded" },
            database,
        }
    }
}
