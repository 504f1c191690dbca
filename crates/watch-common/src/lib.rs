//! # watch-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_api_token, hash_password, validate_password_strength, verify_password, Claims,
    JwtService, SessionToken,
};
pub use config::{
    AdminBootstrapConfig, AppConfig, AppSettings, CheckerConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, OracleConfig, QuotaConfig, RateLimitConfig,
    ServerConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
