//! Database models - SQLx-compatible structs for PostgreSQL tables

mod check;
mod domain;
mod transaction;
mod user;

pub use check::CheckRecordModel;
pub use domain::{DomainModel, DueDomainModel};
pub use transaction::TransactionModel;
pub use user::UserModel;
