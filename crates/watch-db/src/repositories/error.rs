//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use watch_core::error::DomainError;
use watch_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and map it by constraint name, or fall back
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().map(str::to_owned);
            return on_unique(constraint.as_deref());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a balance check violation to a validation error, or fall back
pub fn map_balance_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_check_violation() {
            return DomainError::ValidationError("Credit balance cannot be negative".to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "domain not found" error
pub fn domain_not_found(id: Snowflake) -> DomainError {
    DomainError::DomainNotFound(id)
}
