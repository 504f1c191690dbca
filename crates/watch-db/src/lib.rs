//! # watch-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `watch-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - Embedded schema migrations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use watch_db::pool::{create_pool, DatabaseConfig};
//! use watch_db::repositories::PgUserRepository;
//! use watch_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     watch_db::MIGRATOR.run(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgDomainRepository, PgLedgerRepository, PgUserRepository};

/// Embedded schema migrations, applied at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
