//! # watch-oracle
//!
//! Client for the third-party HTTP service that reports whether a domain is
//! blocked. One GET endpoint, queried with either a single `domain` or a
//! comma-separated `domains` batch (at most 30 names per request), always with
//! `json=true`; the response maps each domain name to an object carrying a
//! `blocked` boolean.

mod client;
mod error;

pub use client::{blocked_for, DomainStatus, HttpOracleClient, StatusOracle};
pub use error::OracleError;
