//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in watch-core.
//! Each repository handles database operations for a specific domain entity.

mod domain;
mod error;
mod ledger;
mod user;

pub use domain::PgDomainRepository;
pub use ledger::PgLedgerRepository;
pub use user::PgUserRepository;
