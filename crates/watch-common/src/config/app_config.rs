//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional .env file.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub oracle: OracleConfig,
    pub checker: CheckerConfig,
    pub quota: QuotaConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub admin: AdminBootstrapConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl: i64,
}

/// Status oracle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_oracle_url")]
    pub url: String,
    /// Request timeout in seconds; timed-out calls are not retried
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum domains per batch request (oracle's documented limit)
    #[serde(default = "default_oracle_batch_size")]
    pub batch_size: usize,
    /// Pause between batch requests in milliseconds
    #[serde(default = "default_oracle_batch_pause_ms")]
    pub batch_pause_ms: u64,
}

/// Check cycle engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Seconds between sweeps of due domains
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Whether the background engine runs at all
    #[serde(default = "default_checker_enabled")]
    pub enabled: bool,
}

/// API quota configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// Length of the quota window in hours
    #[serde(default = "default_quota_window_hours")]
    pub window_hours: i64,
}

/// Rate limiting configuration (global HTTP layer, distinct from the quota gate)
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Optional admin account created at startup when absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminBootstrapConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_admin_username")]
    pub username: String,
}

impl AdminBootstrapConfig {
    /// Whether enough is configured to bootstrap an admin account
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }
}

// Default value functions
fn default_app_name() -> String {
    "blockwatch".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_session_ttl() -> i64 {
    86400 // 24 hours
}

fn default_oracle_url() -> String {
    "https://check.skiddle.id/".to_string()
}

fn default_oracle_timeout_secs() -> u64 {
    10
}

fn default_oracle_batch_size() -> usize {
    30
}

fn default_oracle_batch_pause_ms() -> u64 {
    1000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_checker_enabled() -> bool {
    true
}

fn default_quota_window_hours() -> i64 {
    24
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_admin_username() -> String {
    "admin".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", default_max_connections()),
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS", default_min_connections()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                session_ttl: env_parse("JWT_SESSION_TTL_SECS", default_session_ttl()),
            },
            oracle: OracleConfig {
                url: env::var("ORACLE_URL").unwrap_or_else(|_| default_oracle_url()),
                timeout_secs: env_parse("ORACLE_TIMEOUT_SECS", default_oracle_timeout_secs()),
                batch_size: env_parse("ORACLE_BATCH_SIZE", default_oracle_batch_size()),
                batch_pause_ms: env_parse("ORACLE_BATCH_PAUSE_MS", default_oracle_batch_pause_ms()),
            },
            checker: CheckerConfig {
                sweep_interval_secs: env_parse("CHECK_SWEEP_INTERVAL_SECS", default_sweep_interval_secs()),
                enabled: env_parse("CHECK_ENGINE_ENABLED", default_checker_enabled()),
            },
            quota: QuotaConfig {
                window_hours: env_parse("QUOTA_WINDOW_HOURS", default_quota_window_hours()),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: env_parse("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second()),
                burst: env_parse("RATE_LIMIT_BURST", default_burst()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: env_parse("WORKER_ID", 0),
            },
            admin: AdminBootstrapConfig {
                email: env::var("ADMIN_EMAIL").ok(),
                password: env::var("ADMIN_PASSWORD").ok(),
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| default_admin_username()),
            },
        })
    }
}

/// Parse an env var, falling back to the default on absence or parse failure
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
