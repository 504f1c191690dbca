//! Application state
//!
//! Holds the shared state for the Axum application including the service
//! context, configuration, and the check cycle engine.

use std::sync::Arc;

use watch_common::{AppConfig, JwtService};
use watch_engine::CheckEngine;
use watch_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// The periodic check cycle engine (spawned by the server runner)
    check_engine: Arc<CheckEngine>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig, check_engine: Arc<CheckEngine>) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            check_engine,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    /// Get the check cycle engine
    pub fn check_engine(&self) -> Arc<CheckEngine> {
        self.check_engine.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
