//! Domain registry handlers
//!
//! Session-gated endpoints for listing, adding, removing, and manually
//! checking monitored domains.

use axum::extract::{Path, State};
use axum::Json;
use watch_service::{AddDomainRequest, DomainHistoryResponse, DomainListResponse, DomainService};

use crate::extractors::{AuthUser, DomainIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List the caller's domains with a live account snapshot
///
/// GET /api/domains
pub async fn get_domains(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Add a domain to monitoring (charges one credit immediately)
///
/// POST /api/domains
pub async fn add_domain(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddDomainRequest>,
) -> ApiResult<Created<Json<DomainListResponse>>> {
    let service = DomainService::new(state.service_context());
    let response = service.add(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Remove a domain (no refund)
///
/// DELETE /api/domains/:id
pub async fn remove_domain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.remove(auth.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}

/// Check one domain right now
///
/// POST /api/domains/:id/check
pub async fn check_domain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.check(auth.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}

/// Recent check history for one domain
///
/// GET /api/domains/:id/history
pub async fn domain_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainHistoryResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.history(auth.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}
