//! Status oracle HTTP client

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;
use watch_common::OracleConfig;

use crate::error::OracleError;

/// Per-domain result from the oracle
///
/// The oracle may attach extra fields; only `blocked` matters here, and an
/// omitted flag reads as not blocked.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DomainStatus {
    #[serde(default)]
    pub blocked: bool,
}

/// Resolve the blocked flag for one domain out of a batch response
///
/// A domain the oracle did not mention is treated as not blocked.
#[must_use]
pub fn blocked_for(statuses: &HashMap<String, DomainStatus>, domain: &str) -> bool {
    statuses.get(domain).map(|s| s.blocked).unwrap_or(false)
}

/// Port for the block-status oracle
///
/// Implemented over HTTP in production; tests substitute a stub.
#[async_trait]
pub trait StatusOracle: Send + Sync {
    /// Check a single domain; `Ok(true)` means blocked
    async fn check_domain(&self, domain: &str) -> Result<bool, OracleError>;

    /// Check a batch of domains in one request
    ///
    /// The caller is responsible for keeping batches within the oracle's
    /// per-request limit. Domains absent from the result were not mentioned
    /// by the oracle.
    async fn check_batch(
        &self,
        domains: &[String],
    ) -> Result<HashMap<String, DomainStatus>, OracleError>;
}

/// HTTP implementation of [`StatusOracle`]
#[derive(Debug, Clone)]
pub struct HttpOracleClient {
    http: reqwest::Client,
    url: String,
}

impl HttpOracleClient {
    /// Build a client from oracle configuration
    ///
    /// The request timeout is fixed at construction; timed-out calls are not
    /// retried (the next periodic sweep retries naturally).
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::Build(e.to_string()))?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    async fn fetch_statuses(
        &self,
        query: &[(&str, &str)],
    ) -> Result<HashMap<String, DomainStatus>, OracleError> {
        let response = self.http.get(&self.url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        response
            .json::<HashMap<String, DomainStatus>>()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl StatusOracle for HttpOracleClient {
    #[instrument(skip(self), err)]
    async fn check_domain(&self, domain: &str) -> Result<bool, OracleError> {
        let statuses = self
            .fetch_statuses(&[("domain", domain), ("json", "true")])
            .await?;

        Ok(blocked_for(&statuses, domain))
    }

    #[instrument(skip(self, domains), fields(count = domains.len()), err)]
    async fn check_batch(
        &self,
        domains: &[String],
    ) -> Result<HashMap<String, DomainStatus>, OracleError> {
        let csv = domains.join(",");
        self.fetch_statuses(&[("domains", csv.as_str()), ("json", "true")])
            .await
    }
}
