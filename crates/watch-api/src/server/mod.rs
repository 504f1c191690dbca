//! Server setup and initialization
//!
//! Provides the main application builder and server runner. The runner also
//! spawns the check cycle engine into the same process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use watch_common::auth::{hash_password, JwtService};
use watch_common::{AdminBootstrapConfig, AppConfig, AppError};
use watch_core::entities::User;
use watch_core::traits::UserRepository;
use watch_core::{Role, SnowflakeGenerator};
use watch_db::{create_pool, PgDomainRepository, PgLedgerRepository, PgUserRepository};
use watch_engine::{CheckEngine, EngineConfig};
use watch_oracle::HttpOracleClient;
use watch_service::{ServiceContext, ServiceContextBuilder};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Credits and call allowance granted to a bootstrapped admin
const ADMIN_BOOTSTRAP_ALLOWANCE: i64 = 999_999;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // Health probes bypass the rate limiter
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = watch_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // Apply schema migrations
    watch_db::MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.session_ttl,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create the oracle client
    let oracle = Arc::new(
        HttpOracleClient::new(&config.oracle).map_err(|e| AppError::Config(e.to_string()))?,
    );

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let domain_repo = Arc::new(PgDomainRepository::new(pool.clone()));
    let ledger_repo = Arc::new(PgLedgerRepository::new(pool.clone()));

    // The engine shares the repository and oracle with the interactive surface
    let check_engine = Arc::new(CheckEngine::new(
        domain_repo.clone(),
        oracle.clone(),
        snowflake_generator.clone(),
        EngineConfig::from_app(&config.checker, &config.oracle),
    ));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .domain_repo(domain_repo)
        .ledger_repo(ledger_repo)
        .oracle(oracle)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .quota_window_hours(config.quota.window_hours)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Create the configured admin account when absent
    bootstrap_admin(&service_context, &config.admin).await?;

    Ok(AppState::new(service_context, config, check_engine))
}

/// Create the configured admin account if it does not exist yet
async fn bootstrap_admin(
    ctx: &ServiceContext,
    admin: &AdminBootstrapConfig,
) -> Result<(), AppError> {
    if !admin.is_configured() {
        return Ok(());
    }

    let (Some(email), Some(password)) = (&admin.email, &admin.password) else {
        return Ok(());
    };

    if ctx.user_repo().find_by_email(email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let user = User {
        role: Role::Admin,
        credits: ADMIN_BOOTSTRAP_ALLOWANCE,
        api_calls_limit: ADMIN_BOOTSTRAP_ALLOWANCE,
        ..User::new(ctx.generate_id(), admin.username.clone(), email.clone())
    };

    match ctx.user_repo().create(&user, &password_hash).await {
        Ok(()) => info!(email = %email, "Bootstrapped admin account"),
        // A concurrent instance won the bootstrap race
        Err(watch_core::DomainError::EmailAlreadyExists | watch_core::DomainError::UsernameAlreadyExists) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
///
/// Spawns the check cycle engine on its fixed timer, then serves HTTP until
/// process shutdown.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));
    let engine_enabled = config.checker.enabled;

    // Create app state
    let state = create_app_state(config).await?;

    // Start the periodic check cycle in this process
    if engine_enabled {
        tokio::spawn(state.check_engine().run());
    } else {
        warn!("Check cycle engine disabled by configuration");
    }

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
