//! Machine-to-machine handlers
//!
//! Quota-gated endpoints authenticated by the opaque `X-API-Token`. Every
//! request through here counts against the holder's daily call allowance.

use axum::extract::{Path, State};
use axum::Json;
use watch_service::{DomainListResponse, DomainService};

use crate::extractors::{ApiIdentity, DomainIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List the token holder's domains
///
/// GET /api/ext/domains
pub async fn list_domains(
    State(state): State<AppState>,
    identity: ApiIdentity,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.list(identity.user_id).await?;
    Ok(Json(response))
}

/// Check one of the token holder's domains
///
/// POST /api/ext/domains/:id/check
pub async fn check_domain(
    State(state): State<AppState>,
    identity: ApiIdentity,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.check(identity.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}
