//! Test fixtures and data generators
//!
//! Provides reusable request payloads and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Add-domain request
#[derive(Debug, Serialize)]
pub struct AddDomainRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<String>,
}

impl AddDomainRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            domain: format!("domain{suffix}.example.com"),
            check_interval: None,
        }
    }

    pub fn with_interval(label: &str) -> Self {
        Self {
            check_interval: Some(label.to_string()),
            ..Self::unique()
        }
    }
}

/// Typed admin user update
#[derive(Debug, Default, Serialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_calls_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Admin credit grant
#[derive(Debug, Serialize)]
pub struct AddCredits {
    pub amount: i64,
}

// ============================================================================
// Response shapes
// ============================================================================

/// Authentication response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub credits: i64,
    pub api_calls_limit: i64,
    pub api_calls_count: i64,
    pub api_token: Option<String>,
    pub is_active: bool,
}

/// Domain entry in a listing
#[derive(Debug, Deserialize)]
pub struct DomainResponse {
    pub id: String,
    pub domain: String,
    pub status: Option<bool>,
    pub check_interval: i32,
    pub interval_label: String,
    pub credits_per_check: i64,
    pub last_checked: Option<String>,
}

/// Live account snapshot returned with domain listings
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub credits: i64,
    pub api_calls_count: i64,
    pub api_calls_limit: i64,
    pub api_token: Option<String>,
}

/// Interval table entry
#[derive(Debug, Deserialize)]
pub struct IntervalOption {
    pub label: String,
    pub value: i32,
}

/// Domain listing with account summary
#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    pub message: Option<String>,
    pub domains: Vec<DomainResponse>,
    pub user_info: UserInfo,
    pub valid_intervals: Vec<IntervalOption>,
}

/// Admin user listing
#[derive(Debug, Deserialize)]
pub struct AdminUserListResponse {
    pub users: Vec<AdminUserEntry>,
}

/// One user in the admin listing
#[derive(Debug, Deserialize)]
pub struct AdminUserEntry {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub credits: i64,
    pub is_active: bool,
    pub domains: Vec<DomainResponse>,
}

/// Result of a typed admin update
#[derive(Debug, Deserialize)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: AccountResponse,
}

/// Account fields in admin responses
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub credits: i64,
    pub api_calls_limit: i64,
    pub is_active: bool,
}

/// Result of an admin credit grant
#[derive(Debug, Deserialize)]
pub struct AddCreditsResponse {
    pub message: String,
    pub credits: i64,
}

/// Per-user statistics
#[derive(Debug, Deserialize)]
pub struct UserStatsResponse {
    pub user: AccountResponse,
    pub stats: UserStats,
}

/// Statistics block
#[derive(Debug, Deserialize)]
pub struct UserStats {
    pub domain_count: i64,
    pub recent_transactions: Vec<TransactionResponse>,
}

/// One ledger entry
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    pub amount: i64,
    pub kind: String,
    pub reason: String,
}

/// Issued API token
#[derive(Debug, Deserialize)]
pub struct ApiTokenResponse {
    pub api_token: String,
}

/// Check history listing for one domain
#[derive(Debug, Deserialize)]
pub struct DomainHistoryResponse {
    pub domain: DomainResponse,
    pub history: Vec<CheckHistoryEntry>,
}

/// One completed check
#[derive(Debug, Deserialize)]
pub struct CheckHistoryEntry {
    pub status: bool,
    pub credits_used: i64,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
