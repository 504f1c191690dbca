//! Admin handlers
//!
//! Role-gated endpoints for user management, credit grants, API token
//! lifecycle, statistics, and the admin's own domain set.

use axum::extract::{Path, State};
use axum::Json;
use watch_service::{
    AddCreditsRequest, AddCreditsResponse, AddDomainRequest, AdminService, AdminUserListResponse,
    AdminUserUpdateRequest, ApiTokenResponse, DomainListResponse, DomainService,
    UserDomainsResponse, UserStatsResponse, UserUpdateResponse,
};

use crate::extractors::{AdminUser, DomainIdPath, UserDomainPath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Admin's own domains (same operations as the user surface, admin scope)
// ============================================================================

/// List the admin's own domains
///
/// GET /api/admin/domains
pub async fn get_admin_domains(
    State(state): State<AppState>,
    AdminUser(auth): AdminUser,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Add a domain to the admin's own set
///
/// POST /api/admin/domains
pub async fn add_admin_domain(
    State(state): State<AppState>,
    AdminUser(auth): AdminUser,
    ValidatedJson(request): ValidatedJson<AddDomainRequest>,
) -> ApiResult<Created<Json<DomainListResponse>>> {
    let service = DomainService::new(state.service_context());
    let response = service.add(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Check one of the admin's own domains
///
/// POST /api/admin/domains/:id/check
pub async fn check_admin_domain(
    State(state): State<AppState>,
    AdminUser(auth): AdminUser,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.check(auth.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}

/// Remove one of the admin's own domains
///
/// DELETE /api/admin/domains/:id
pub async fn remove_admin_domain(
    State(state): State<AppState>,
    AdminUser(auth): AdminUser,
    Path(path): Path<DomainIdPath>,
) -> ApiResult<Json<DomainListResponse>> {
    let service = DomainService::new(state.service_context());
    let response = service.remove(auth.user_id, path.domain_id()?).await?;
    Ok(Json(response))
}

// ============================================================================
// User management
// ============================================================================

/// List every managed user with their domains
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
) -> ApiResult<Json<AdminUserListResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.list_users().await?;
    Ok(Json(response))
}

/// Apply a typed field update to a user
///
/// PUT /api/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<AdminUserUpdateRequest>,
) -> ApiResult<Json<UserUpdateResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.update_user(path.user_id()?, request).await?;
    Ok(Json(response))
}

/// One user's domains
///
/// GET /api/admin/users/:id/domains
pub async fn user_domains(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserDomainsResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.user_domains(path.user_id()?).await?;
    Ok(Json(response))
}

/// Check one of a user's domains on their behalf
///
/// POST /api/admin/users/:id/domains/:domain_id/check
pub async fn check_user_domain(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserDomainPath>,
) -> ApiResult<Json<UserDomainsResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service
        .check_user_domain(path.user_id()?, path.domain_id()?)
        .await?;
    Ok(Json(response))
}

/// Grant credits to a user
///
/// POST /api/admin/users/:id/credits
pub async fn add_user_credits(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<AddCreditsRequest>,
) -> ApiResult<Json<AddCreditsResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.add_credits(path.user_id()?, request).await?;
    Ok(Json(response))
}

/// Per-user statistics
///
/// GET /api/admin/users/:id/stats
pub async fn user_stats(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.user_stats(path.user_id()?).await?;
    Ok(Json(response))
}

/// Issue a fresh API token, restarting the quota window
///
/// POST /api/admin/users/:id/api-token
pub async fn issue_api_token(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ApiTokenResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.issue_api_token(path.user_id()?).await?;
    Ok(Json(response))
}

/// Revoke a user's API token
///
/// DELETE /api/admin/users/:id/api-token
pub async fn revoke_api_token(
    State(state): State<AppState>,
    AdminUser(_auth): AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<NoContent> {
    let service = AdminService::new(state.service_context());
    service.revoke_api_token(path.user_id()?).await?;
    Ok(NoContent)
}
