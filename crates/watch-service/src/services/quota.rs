//! API quota gate
//!
//! Resolves an opaque API token to a user id while enforcing the per-window
//! call limit. The window resets lazily: the first call past the stored
//! deadline zeroes the counter and advances the deadline by one period.

use chrono::{DateTime, Duration, Utc};
use tracing::{instrument, warn};
use watch_common::AppError;
use watch_core::traits::UserRepository;
use watch_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Compute the next reset deadline from "now"
#[must_use]
pub(crate) fn next_reset(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now + window
}

/// API quota gate service
pub struct QuotaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuotaService<'a> {
    /// Create a new QuotaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authorize one API call for the holder of `token`
    ///
    /// On success the call is counted and only the resolved user id is
    /// returned; handlers deliberately do not receive the full user record.
    #[instrument(skip(self, token))]
    pub async fn authorize(&self, token: &str) -> ServiceResult<Snowflake> {
        let user = self
            .ctx
            .user_repo()
            .find_by_api_token(token)
            .await?
            .ok_or_else(|| {
                warn!("Rejected unknown or inactive API token");
                ServiceError::App(AppError::InvalidApiToken)
            })?;

        let now = Utc::now();
        let mut calls_used = user.api_calls_count;

        // Lazy window reset: zero the counter and renew the deadline
        if user.quota_window_expired(now) {
            let reset_at = next_reset(now, self.ctx.quota_window());
            self.ctx.user_repo().reset_quota_window(user.id, reset_at).await?;
            calls_used = 0;
        }

        if calls_used >= user.api_calls_limit {
            warn!(user_id = %user.id, "API call limit exceeded");
            return Err(ServiceError::App(AppError::QuotaExceeded));
        }

        self.ctx.user_repo().increment_api_calls(user.id).await?;

        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_reset_advances_by_window() {
        let now = Utc::now();
        let window = Duration::hours(24);
        assert_eq!(next_reset(now, window), now + Duration::hours(24));
    }
}
