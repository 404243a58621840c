//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on a single
//! abstraction instead of individual stores.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{NoteRepository, NoteStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository (the credential store)
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get note repository
    fn notes(&self) -> Arc<dyn NoteRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    note_repo: Arc<NoteStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            note_repo: Arc::new(NoteStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn notes(&self) -> Arc<dyn NoteRepository> {
        self.note_repo.clone()
    }
}
