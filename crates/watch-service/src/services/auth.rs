//! Authentication service
//!
//! Handles registration, login, password changes, and self-service API
//! token issuance.

use tracing::{info, instrument, warn};
use watch_common::auth::{
    generate_api_token, hash_password, validate_password_strength, verify_password,
};
use watch_common::AppError;
use watch_core::entities::User;
use watch_core::traits::UserRepository;
use watch_core::Snowflake;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with default role, credits, and quota
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Reject duplicate identity early; the unique constraints back this up
        if self
            .ctx
            .user_repo()
            .identity_taken(&request.username, &request.email)
            .await?
        {
            return Err(ServiceError::conflict("Username or email already registered"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user with registration defaults
        let user = User::new(self.ctx.generate_id(), request.username, request.email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Login with email and password, issuing a session token
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        // An inactive account fails with an authorization error even when the
        // credential was correct
        if !user.is_active {
            warn!(user_id = %user.id, "Login rejected: account inactive");
            return Err(ServiceError::App(AppError::AccountInactive));
        }

        // Issue session token
        let session = self
            .ctx
            .jwt_service()
            .issue_session(user.id, user.role)
            .map_err(ServiceError::from)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(AuthResponse {
            token: session.token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            user: CurrentUserResponse::from(&user),
        })
    }

    /// Change password after re-verifying the current one
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let is_valid = verify_password(&request.current_password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Generate a fresh API token for the caller's own account
    #[instrument(skip(self))]
    pub async fn generate_token(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let token = generate_api_token();
        self.ctx.user_repo().set_api_token(user_id, &token).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        info!(user_id = %user_id, "API token generated");

        Ok(CurrentUserResponse::from(&user))
    }
}
