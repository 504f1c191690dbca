//! Business services
//!
//! Each service borrows the shared [`ServiceContext`] and implements one
//! slice of the application: authentication, domain registry, admin
//! operations, and the API quota gate.

mod admin;
mod auth;
mod context;
mod domain;
mod error;
mod quota;

pub use admin::AdminService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use domain::DomainService;
pub use error::{ServiceError, ServiceResult};
pub use quota::QuotaService;
