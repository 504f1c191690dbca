//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{
    AddCreditsRequest, AddDomainRequest, AdminUserUpdateRequest, ChangePasswordRequest,
    LoginRequest, RegisterRequest,
};
pub use responses::{
    AccountResponse, AddCreditsResponse, AdminUserListResponse, AdminUserResponse,
    ApiTokenResponse, AuthResponse, CheckHistoryResponse, CurrentUserResponse,
    DomainHistoryResponse, DomainListResponse, DomainResponse, HealthResponse, IntervalOption,
    ReadinessResponse, TransactionResponse, UserDomainsResponse, UserInfo, UserStats,
    UserStatsResponse, UserSummary, UserUpdateResponse,
};
