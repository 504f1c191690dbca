//! Route definitions
//!
//! All API routes organized by group and mounted under /api.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, domains, ext, health};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(domain_routes())
        .merge(admin_routes())
        .merge(ext_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/generate-token", post(auth::generate_token))
}

/// Domain registry routes (session-gated)
fn domain_routes() -> Router<AppState> {
    Router::new()
        .route("/domains", get(domains::get_domains))
        .route("/domains", post(domains::add_domain))
        .route("/domains/:id", delete(domains::remove_domain))
        .route("/domains/:id/check", post(domains::check_domain))
        .route("/domains/:id/history", get(domains::domain_history))
}

/// Admin routes (session-gated + admin-role-gated)
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Admin's own domain management
        .route("/admin/domains", get(admin::get_admin_domains))
        .route("/admin/domains", post(admin::add_admin_domain))
        .route("/admin/domains/:id/check", post(admin::check_admin_domain))
        .route("/admin/domains/:id", delete(admin::remove_admin_domain))
        // User management
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id", put(admin::update_user))
        .route("/admin/users/:id/domains", get(admin::user_domains))
        .route(
            "/admin/users/:id/domains/:domain_id/check",
            post(admin::check_user_domain),
        )
        .route("/admin/users/:id/credits", post(admin::add_user_credits))
        .route("/admin/users/:id/stats", get(admin::user_stats))
        // API token management
        .route("/admin/users/:id/api-token", post(admin::issue_api_token))
        .route("/admin/users/:id/api-token", delete(admin::revoke_api_token))
}

/// Machine-to-machine routes (API-token + quota-gated)
fn ext_routes() -> Router<AppState> {
    Router::new()
        .route("/ext/domains", get(ext::list_domains))
        .route("/ext/domains/:id/check", post(ext::check_domain))
}
