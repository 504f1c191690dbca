//! HTTP request handlers, organized by route group

pub mod admin;
pub mod auth;
pub mod domains;
pub mod ext;
pub mod health;
