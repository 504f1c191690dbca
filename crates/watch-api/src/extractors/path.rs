//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use watch_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with a domain id
#[derive(Debug, serde::Deserialize)]
pub struct DomainIdPath {
    pub id: String,
}

impl DomainIdPath {
    /// Parse the domain id as a Snowflake
    pub fn domain_id(&self) -> Result<Snowflake, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid domain id format"))
    }
}

/// Path parameters with a user id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub id: String,
}

impl UserIdPath {
    /// Parse the user id as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user id format"))
    }
}

/// Path parameters with a user id and a domain id
#[derive(Debug, serde::Deserialize)]
pub struct UserDomainPath {
    pub id: String,
    pub domain_id: String,
}

impl UserDomainPath {
    /// Parse the user id as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user id format"))
    }

    /// Parse the domain id as a Snowflake
    pub fn domain_id(&self) -> Result<Snowflake, ApiError> {
        self.domain_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid domain id format"))
    }
}
