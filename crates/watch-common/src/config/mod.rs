//! Configuration structs

mod app_config;

pub use app_config::{
    AdminBootstrapConfig, AppConfig, AppSettings, CheckerConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, OracleConfig, QuotaConfig, RateLimitConfig,
    ServerConfig, SnowflakeConfig,
};
