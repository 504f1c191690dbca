//! Service context - dependency container for services
//!
//! Holds repositories, the oracle client, and shared services.

use std::sync::Arc;

use chrono::Duration;
use watch_common::auth::JwtService;
use watch_core::traits::{DomainRepository, LedgerRepository, UserRepository};
use watch_core::{Snowflake, SnowflakeGenerator};
use watch_db::PgPool;
use watch_oracle::StatusOracle;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The block-status oracle client
/// - JWT service for session tokens
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (kept for readiness probes)
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    domain_repo: Arc<dyn DomainRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,

    // External oracle
    oracle: Arc<dyn StatusOracle>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Quota window length
    quota_window_hours: i64,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the domain repository
    pub fn domain_repo(&self) -> &dyn DomainRepository {
        self.domain_repo.as_ref()
    }

    /// Get the ledger repository
    pub fn ledger_repo(&self) -> &dyn LedgerRepository {
        self.ledger_repo.as_ref()
    }

    /// Get the status oracle
    pub fn oracle(&self) -> &dyn StatusOracle {
        self.oracle.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Length of one API quota window
    pub fn quota_window(&self) -> Duration {
        Duration::hours(self.quota_window_hours)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("quota_window_hours", &self.quota_window_hours)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    domain_repo: Option<Arc<dyn DomainRepository>>,
    ledger_repo: Option<Arc<dyn LedgerRepository>>,
    oracle: Option<Arc<dyn StatusOracle>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    quota_window_hours: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn domain_repo(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domain_repo = Some(repo);
        self
    }

    pub fn ledger_repo(mut self, repo: Arc<dyn LedgerRepository>) -> Self {
        self.ledger_repo = Some(repo);
        self
    }

    pub fn oracle(mut self, oracle: Arc<dyn StatusOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn quota_window_hours(mut self, hours: i64) -> Self {
        self.quota_window_hours = Some(hours);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            domain_repo: self
                .domain_repo
                .ok_or_else(|| ServiceError::validation("domain_repo is required"))?,
            ledger_repo: self
                .ledger_repo
                .ok_or_else(|| ServiceError::validation("ledger_repo is required"))?,
            oracle: self
                .oracle
                .ok_or_else(|| ServiceError::validation("oracle is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            quota_window_hours: self.quota_window_hours.unwrap_or(24),
        })
    }
}
