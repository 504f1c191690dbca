//! API token extractor - the quota gate
//!
//! Resolves the `X-API-Token` header to a user id through the quota service.
//! Each successful extraction counts one call against the holder's window;
//! only the resolved identity is attached to the request, never the full
//! user record.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use watch_core::Snowflake;
use watch_service::QuotaService;

use crate::response::ApiError;
use crate::state::AppState;

/// Header carrying the opaque machine-to-machine token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Identity resolved from an API token, after passing the quota gate
#[derive(Debug, Clone, Copy)]
pub struct ApiIdentity {
    pub user_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(API_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let quota = QuotaService::new(app_state.service_context());

        let user_id = quota.authorize(token).await.map_err(ApiError::Service)?;

        Ok(ApiIdentity { user_id })
    }
}
