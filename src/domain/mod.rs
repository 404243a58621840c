//! Domain layer - Core business entities and logic
//!
//! This module contains the identity, role and note models, the password
//! hasher, and the typed errors of the authentication core.

pub mod error;
pub mod note;
pub mod password;
pub mod user;

pub use error::{AuthError, LoginError, PasswordError, RegisterError, StoreError, TokenError};
pub use note::{AdminNoteResponse, Note, NoteResponse};
pub use password::Password;
pub use user::{AuthenticatedContext, Identity, NewIdentity, UnknownRole, UserRole};
