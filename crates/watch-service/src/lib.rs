//! # watch-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AccountResponse, AddCreditsRequest, AddCreditsResponse, AddDomainRequest,
    AdminUserListResponse, AdminUserResponse, AdminUserUpdateRequest, ApiTokenResponse,
    AuthResponse, ChangePasswordRequest, CheckHistoryResponse, CurrentUserResponse,
    DomainHistoryResponse, DomainListResponse, DomainResponse, HealthResponse, IntervalOption,
    LoginRequest, ReadinessResponse, RegisterRequest, TransactionResponse, UserDomainsResponse,
    UserInfo, UserStats, UserStatsResponse, UserSummary, UserUpdateResponse,
};
pub use services::{
    AdminService, AuthService, DomainService, QuotaService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
