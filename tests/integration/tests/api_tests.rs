//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! The status oracle is pointed at an unroutable address, so manual checks
//! deterministically fail open ("not blocked") while still charging credits.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer, TEST_ADMIN_EMAIL,
    TEST_ADMIN_PASSWORD,
};
use reqwest::StatusCode;

/// Register a fresh user and log them in
async fn register_and_login(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let register = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let login = LoginRequest::from_register(&register);
    let response = server.post("/api/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (register, auth)
}

/// Log in as the bootstrapped test admin
async fn login_admin(server: &TestServer) -> AuthResponse {
    let login = LoginRequest {
        email: TEST_ADMIN_EMAIL.to_string(),
        password: TEST_ADMIN_PASSWORD.to_string(),
    };
    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_defaults_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &register).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Registration defaults
    assert_eq!(user.role, "user");
    assert_eq!(user.credits, 100);
    assert_eq!(user.api_calls_limit, 1000);
    assert_eq!(user.api_calls_count, 0);
    assert!(user.is_active);
    assert!(user.api_token.is_none());

    // Immediately able to authenticate
    let login = LoginRequest::from_register(&register);
    let response = server.post("/api/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!auth.token.is_empty());
    assert_eq!(auth.user.username, register.username);
}

#[tokio::test]
async fn test_register_duplicate_identity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();

    server.post("/api/auth/register", &register).await.unwrap();

    let response = server.post("/api/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut register = RegisterRequest::unique();
    register.password = "alllowercase1".to_string();

    let response = server.post("/api/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_inactive_account_login_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    // Admin deactivates the account
    let update = AdminUserUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    let response = server
        .put_auth(&format!("/api/admin/users/{}", auth.user.id), &admin.token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A correct credential now fails with an authorization error, not 401
    let login = LoginRequest::from_register(&register);
    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_change_password_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, auth) = register_and_login(&server).await;

    // Wrong current password is rejected
    let response = server
        .post_auth(
            "/api/auth/change-password",
            &auth.token,
            &serde_json::json!({
                "current_password": "NotTheRightOne1",
                "new_password": "BrandNewPass1",
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Correct current password succeeds
    let response = server
        .post_auth(
            "/api/auth/change-password",
            &auth.token,
            &serde_json::json!({
                "current_password": register.password,
                "new_password": "BrandNewPass1",
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Old password no longer works; the new one does
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: register.email.clone(),
                password: "BrandNewPass1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_generate_api_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server
        .post_auth_empty("/api/auth/generate-token", &auth.token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let token = user.api_token.expect("token should be set");
    assert_eq!(token.len(), 64);
}

// ============================================================================
// Domain Registry Tests
// ============================================================================

#[tokio::test]
async fn test_domains_require_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/domains").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_add_domain_charges_one_credit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // One credit gone before any check ran
    assert_eq!(list.user_info.credits, 99);
    assert_eq!(list.domains.len(), 1);

    let domain = &list.domains[0];
    assert_eq!(domain.domain, request.domain);
    assert_eq!(domain.interval_label, "1hour");
    assert_eq!(domain.check_interval, 3600);
    assert_eq!(domain.credits_per_check, 1);
    assert!(domain.status.is_none());
    assert!(domain.last_checked.is_none());

    // The interval table rides along
    assert_eq!(list.valid_intervals.len(), 9);
}

#[tokio::test]
async fn test_add_domain_with_interval_label() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::with_interval("30min");
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(list.domains[0].interval_label, "30min");
    assert_eq!(list.domains[0].check_interval, 1800);
}

#[tokio::test]
async fn test_add_domain_unknown_interval_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::with_interval("45min");
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_domain_conflict_without_double_charge() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same (user, domain) again: conflict, and no second deduction
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get_auth("/api/domains", &auth.token).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.user_info.credits, 99);
    assert_eq!(list.domains.len(), 1);
}

#[tokio::test]
async fn test_remove_domain_no_refund() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list.domains[0].id.clone();

    let response = server
        .delete_auth(&format!("/api/domains/{domain_id}"), &auth.token)
        .await
        .unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(list.domains.is_empty());
    // The credit spent on add stays spent
    assert_eq!(list.user_info.credits, 99);
}

#[tokio::test]
async fn test_remove_foreign_domain_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_and_login(&server).await;
    let (_, intruder) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &owner.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list.domains[0].id.clone();

    let response = server
        .delete_auth(&format!("/api/domains/{domain_id}"), &intruder.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_manual_check_fails_open_and_charges() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list.domains[0].id.clone();

    let response = server
        .post_auth_empty(&format!("/api/domains/{domain_id}/check"), &auth.token)
        .await
        .unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Oracle unreachable: fail open to "not blocked", still settle the check
    let domain = &list.domains[0];
    assert_eq!(domain.status, Some(false));
    assert!(domain.last_checked.is_some());
    assert_eq!(list.user_info.credits, 98);
}

#[tokio::test]
async fn test_check_history_records_each_settle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list.domains[0].id.clone();

    server
        .post_auth_empty(&format!("/api/domains/{domain_id}/check"), &auth.token)
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("/api/domains/{domain_id}/history"), &auth.token)
        .await
        .unwrap();
    let history: DomainHistoryResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(history.history.len(), 1);
    assert_eq!(history.history[0].credits_used, 1);
    assert!(!history.history[0].status);
}

#[tokio::test]
async fn test_last_credit_spends_to_zero_then_insufficient() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    // One monitored domain, then exactly one credit left
    let request = AddDomainRequest::unique();
    let response = server.post_auth("/api/domains", &auth.token, &request).await.unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list.domains[0].id.clone();

    let update = AdminUserUpdate {
        credits: Some(1),
        ..Default::default()
    };
    let response = server
        .put_auth(&format!("/api/admin/users/{}", auth.user.id), &admin.token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Balance exactly 1: the check succeeds and leaves 0
    let response = server
        .post_auth_empty(&format!("/api/domains/{domain_id}/check"), &auth.token)
        .await
        .unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.user_info.credits, 0);

    // Any further credit-gated operation is now insufficient
    let response = server
        .post_auth_empty(&format!("/api/domains/{domain_id}/check"), &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth("/api/domains", &auth.token, &AddDomainRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_plain_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server.get_auth("/api/admin/users", &auth.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_list_users_excludes_admins() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, _) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    let response = server.get_auth("/api/admin/users", &admin.token).await.unwrap();
    let list: AdminUserListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(list.users.iter().any(|u| u.username == register.username));
    assert!(list.users.iter().all(|u| u.role != "admin"));
}

#[tokio::test]
async fn test_admin_update_logs_credit_transaction() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    let update = AdminUserUpdate {
        credits: Some(150),
        ..Default::default()
    };
    let response = server
        .put_auth(&format!("/api/admin/users/{}", auth.user.id), &admin.token, &update)
        .await
        .unwrap();
    let updated: UserUpdateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.user.credits, 150);

    let response = server
        .get_auth(&format!("/api/admin/users/{}/stats", auth.user.id), &admin.token)
        .await
        .unwrap();
    let stats: UserStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.stats.domain_count, 0);
    let adjustment = &stats.stats.recent_transactions[0];
    assert_eq!(adjustment.amount, 50);
    assert_eq!(adjustment.kind, "add");
    assert_eq!(adjustment.reason, "Admin adjustment");
}

#[tokio::test]
async fn test_admin_update_empty_body_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    let response = server
        .put_auth(
            &format!("/api/admin/users/{}", auth.user.id),
            &admin.token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_admin_add_credits() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    let response = server
        .post_auth(
            &format!("/api/admin/users/{}/credits", auth.user.id),
            &admin.token,
            &AddCredits { amount: 25 },
        )
        .await
        .unwrap();
    let granted: AddCreditsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(granted.credits, 125);

    // Non-positive amounts are rejected
    let response = server
        .post_auth(
            &format!("/api/admin/users/{}/credits", auth.user.id),
            &admin.token,
            &AddCredits { amount: 0 },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_admin_manages_own_domains() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = login_admin(&server).await;

    let request = AddDomainRequest::unique();
    let response = server
        .post_auth("/api/admin/domains", &admin.token, &request)
        .await
        .unwrap();
    let list: DomainListResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let domain_id = list
        .domains
        .iter()
        .find(|d| d.domain == request.domain)
        .unwrap()
        .id
        .clone();

    let response = server
        .post_auth_empty(&format!("/api/admin/domains/{domain_id}/check"), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/domains/{domain_id}"), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Quota Gate Tests
// ============================================================================

#[tokio::test]
async fn test_ext_requires_api_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/ext/domains").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_api_token("/api/ext/domains", "no-such-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_quota_gate_enforces_limit_and_resets() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    // Tight limit, then an admin-issued token (which starts the window)
    let update = AdminUserUpdate {
        api_calls_limit: Some(3),
        ..Default::default()
    };
    let response = server
        .put_auth(&format!("/api/admin/users/{}", auth.user.id), &admin.token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth_empty(&format!("/api/admin/users/{}/api-token", auth.user.id), &admin.token)
        .await
        .unwrap();
    let token: ApiTokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Exactly `limit` accepted calls...
    for _ in 0..3 {
        let response = server
            .get_api_token("/api/ext/domains", &token.api_token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    // ...then the next one is rate-limited
    let response = server
        .get_api_token("/api/ext/domains", &token.api_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();

    // Force the reset deadline into the past; the window must renew lazily
    let pool = integration_tests::test_pool().await.unwrap();
    let user_id: i64 = auth.user.id.parse().unwrap();
    sqlx::query("UPDATE users SET api_calls_reset_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = server
        .get_api_token("/api/ext/domains", &token.api_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The window advanced and the accepted call was counted
    let (count, reset_in_future): (i64, bool) = sqlx::query_as(
        "SELECT api_calls_count, api_calls_reset_at > NOW() FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert!(reset_in_future);
}

#[tokio::test]
async fn test_revoked_token_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let admin = login_admin(&server).await;

    let response = server
        .post_auth_empty(&format!("/api/admin/users/{}/api-token", auth.user.id), &admin.token)
        .await
        .unwrap();
    let token: ApiTokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_api_token("/api/ext/domains", &token.api_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/users/{}/api-token", auth.user.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_api_token("/api/ext/domains", &token.api_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
