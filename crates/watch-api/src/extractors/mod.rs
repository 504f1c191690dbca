//! Axum extractors for request handling
//!
//! Custom extractors for session auth, the API-token quota gate, path
//! parameters, and validated JSON bodies.

mod api_token;
mod auth;
mod path;
mod validated;

pub use api_token::ApiIdentity;
pub use auth::{AdminUser, AuthUser};
pub use path::{DomainIdPath, UserDomainPath, UserIdPath};
pub use validated::ValidatedJson;
