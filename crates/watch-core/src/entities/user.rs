//! User entity - a registered account with a credit balance and API quota

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, Snowflake};

/// Credits granted to every new account
pub const DEFAULT_CREDITS: i64 = 100;

/// Daily API call allowance granted to every new account
pub const DEFAULT_API_CALLS_LIMIT: i64 = 1000;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub credits: i64,
    pub api_calls_limit: i64,
    pub api_calls_count: i64,
    pub api_calls_reset_at: Option<DateTime<Utc>>,
    /// Opaque machine-to-machine secret; None until first issued
    pub api_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with registration defaults
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            role: Role::User,
            credits: DEFAULT_CREDITS,
            api_calls_limit: DEFAULT_API_CALLS_LIMIT,
            api_calls_count: 0,
            api_calls_reset_at: None,
            api_token: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the balance covers a charge of `cost` credits
    #[inline]
    pub fn can_afford(&self, cost: i64) -> bool {
        self.credits >= cost
    }

    /// Whether the quota window has lapsed and the counter is due for a reset
    pub fn quota_window_expired(&self, now: DateTime<Utc>) -> bool {
        self.api_calls_reset_at.is_some_and(|reset_at| now > reset_at)
    }

    /// Whether the account has used up its API call allowance for the window
    #[inline]
    pub fn quota_exhausted(&self) -> bool {
        self.api_calls_count >= self.api_calls_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_user() -> User {
        User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@example.com".to_string(),
        )
    }

    #[test]
    fn test_registration_defaults() {
        let user = test_user();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.credits, 100);
        assert_eq!(user.api_calls_limit, 1000);
        assert_eq!(user.api_calls_count, 0);
        assert!(user.is_active);
        assert!(user.api_token.is_none());
    }

    #[test]
    fn test_can_afford() {
        let mut user = test_user();
        user.credits = 1;
        assert!(user.can_afford(1));
        assert!(!user.can_afford(2));

        user.credits = 0;
        assert!(!user.can_afford(1));
        assert!(user.can_afford(0));
    }

    #[test]
    fn test_quota_window_expired() {
        let mut user = test_user();
        let now = Utc::now();

        // No window yet: nothing to reset
        assert!(!user.quota_window_expired(now));

        user.api_calls_reset_at = Some(now + Duration::hours(1));
        assert!(!user.quota_window_expired(now));

        user.api_calls_reset_at = Some(now - Duration::seconds(1));
        assert!(user.quota_window_expired(now));
    }

    #[test]
    fn test_quota_exhausted() {
        let mut user = test_user();
        user.api_calls_limit = 3;
        user.api_calls_count = 2;
        assert!(!user.quota_exhausted());

        user.api_calls_count = 3;
        assert!(user.quota_exhausted());
    }
}
