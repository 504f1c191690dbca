//! # watch-api
//!
//! REST API server built with the Axum framework. Also hosts the periodic
//! check cycle engine, which runs in the same process on its own timer.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
