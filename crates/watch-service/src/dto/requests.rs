//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with fields to check also
//! implement `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;
use watch_core::CheckInterval;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Password change request; the current password must re-verify
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// Domain Requests
// ============================================================================

/// Add a domain to monitoring
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddDomainRequest {
    #[validate(length(min = 1, max = 253, message = "Domain is required"))]
    pub domain: String,

    /// Interval label from the fixed set; omitted means one hour
    #[serde(default)]
    pub check_interval: Option<CheckInterval>,
}

impl AddDomainRequest {
    /// The requested interval, defaulted when absent
    #[must_use]
    pub fn interval(&self) -> CheckInterval {
        self.check_interval.unwrap_or_default()
    }
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Typed admin update of a user account
///
/// Named optional fields are the entire allow-list: credits, API call limit,
/// and the active flag. Anything else on the wire is rejected by serde.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AdminUserUpdateRequest {
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: Option<i64>,

    #[validate(range(min = 0, message = "API call limit cannot be negative"))]
    pub api_calls_limit: Option<i64>,

    pub is_active: Option<bool>,
}

impl AdminUserUpdateRequest {
    /// Whether the request changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credits.is_none() && self.api_calls_limit.is_none() && self.is_active.is_none()
    }
}

/// Grant credits to a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCreditsRequest {
    #[validate(range(min = 1, message = "Invalid credit amount"))]
    pub amount: i64,
}
