//! Service Container - Centralized service access.
//!
//! Builds every service from one database connection and one [`Config`],
//! and hands them out as trait objects.

use std::sync::Arc;

use super::{AuthService, Authenticator, NoteManager, NoteService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get note service
    fn notes(&self) -> Arc<dyn NoteService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    note_service: Arc<dyn NoteService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let note_service = Arc::new(NoteManager::new(uow));

        Self {
            auth_service,
            note_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn notes(&self) -> Arc<dyn NoteService> {
        self.note_service.clone()
    }
}
