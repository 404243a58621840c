//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod access_gate;
mod auth_service;
pub mod container;
mod note_service;
pub mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Authentication core
pub use access_gate::{admit, authorize, AccessGate};
pub use token_service::{Claims, Token, TokenService};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use note_service::{NoteManager, NoteService};
