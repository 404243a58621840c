//! Notes API - Multi-user notes with token authentication.
//!
//! Users register with a username and password, log in for a short-lived
//! signed token, and use it to create and list their own notes. Admins can
//! list every note; the admin check always reads the role currently stored
//! for the caller.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Identities, roles, notes, password hashing, core errors
//! - **services**: Registration, login, tokens, access gate, notes
//! - **infra**: Database, migrations, repositories, Redis cache
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: HTTP-facing error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! notes-api serve
//!
//! # Run migrations
//! notes-api migrate up
//!
//! # Promote a user
//! notes-api users set-role alice admin
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{AuthenticatedContext, Identity, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
