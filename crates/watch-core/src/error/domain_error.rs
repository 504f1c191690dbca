//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Domain not found: {0}")]
    DomainNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid check interval: {0}")]
    InvalidCheckInterval(String),

    // =========================================================================
    // Authorization / Business Rule Errors
    // =========================================================================
    #[error("Account is inactive")]
    AccountInactive,

    #[error("Insufficient credits")]
    InsufficientCredits,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Domain already being monitored: {0}")]
    DomainAlreadyMonitored(String),

    /// A concurrent settle won the optimistic race on `last_checked`
    #[error("Check already settled by a concurrent run")]
    CheckSuperseded,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::DomainNotFound(_) => "UNKNOWN_DOMAIN",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidCheckInterval(_) => "INVALID_CHECK_INTERVAL",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::DomainAlreadyMonitored(_) => "DOMAIN_ALREADY_MONITORED",
            Self::CheckSuperseded => "CHECK_SUPERSEDED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error (-> 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::DomainNotFound(_))
    }

    /// Check if this is a validation error (-> 400)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidCheckInterval(_))
    }

    /// Check if this is an authorization error (-> 403)
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AccountInactive | Self::InsufficientCredits)
    }

    /// Check if this is a conflict error (-> 409)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::DomainAlreadyMonitored(_)
                | Self::CheckSuperseded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_disjoint() {
        let errors = [
            DomainError::UserNotFound(Snowflake::new(1)),
            DomainError::ValidationError("x".into()),
            DomainError::AccountInactive,
            DomainError::EmailAlreadyExists,
            DomainError::DatabaseError("x".into()),
        ];
        for err in &errors {
            let flags = [
                err.is_not_found(),
                err.is_validation(),
                err.is_authorization(),
                err.is_conflict(),
            ];
            assert!(flags.iter().filter(|f| **f).count() <= 1, "{err:?}");
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(DomainError::InsufficientCredits.code(), "INSUFFICIENT_CREDITS");
        assert_eq!(
            DomainError::DomainAlreadyMonitored("example.com".into()).code(),
            "DOMAIN_ALREADY_MONITORED"
        );
        assert_eq!(DomainError::CheckSuperseded.code(), "CHECK_SUPERSEDED");
    }

    #[test]
    fn test_interval_error_mentions_label() {
        let err = DomainError::InvalidCheckInterval("45min".into());
        assert!(err.to_string().contains("45min"));
    }
}
