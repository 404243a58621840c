//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{AuthService, NoteService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Note service
    pub note_service: Arc<dyn NoteService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Redis cache; rate limiting is disabled without it
    pub cache: Option<Arc<Cache>>,
    /// Whether the rate limiter may key on proxy-supplied client headers
    pub trust_proxy_headers: bool,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Option<Arc<Cache>>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            note_service: container.notes(),
            database,
            cache,
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }
}
