//! Domain entities - core business objects

mod check;
mod domain;
mod transaction;
mod user;

pub use check::CheckHistoryEntry;
pub use domain::MonitoredDomain;
pub use transaction::{CreditTransaction, TransactionKind};
pub use user::User;
