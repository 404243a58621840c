//! Domain-level errors for the authentication core.
//!
//! Each operation gets its own error type so callers can only observe the
//! outcomes that operation is allowed to report. The HTTP mapping lives in
//! `crate::errors`.

use sea_orm::DbErr;
use thiserror::Error;

/// Password hashing failure. Verification never fails, it returns `false`.
#[derive(Error, Debug)]
#[error("Password hash failed: {0}")]
pub struct PasswordError(pub String);

/// Token issuance and verification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed or carries unusable claims
    #[error("Malformed token")]
    Malformed,

    /// The signature does not match the token contents under our secret
    #[error("Token signature verification failed")]
    InvalidSignature,

    /// The token's expiry is in the past
    #[error("Token expired")]
    Expired,

    /// Signing failed while issuing a token
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Credential store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Identity not found")]
    NotFound,

    #[error("Database error")]
    Database(#[from] DbErr),
}

/// Registration errors.
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Storage failure")]
    Storage(#[source] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RegisterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => RegisterError::UsernameTaken,
            other => RegisterError::Storage(other),
        }
    }
}

impl From<PasswordError> for RegisterError {
    fn from(err: PasswordError) -> Self {
        RegisterError::Internal(err.to_string())
    }
}

/// Login errors. Unknown user and wrong password are the same variant.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage failure")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for LoginError {
    fn from(err: TokenError) -> Self {
        LoginError::Internal(err.to_string())
    }
}

/// Access gate errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing, malformed, tampered or expired token
    #[error("Authentication required")]
    Unauthenticated,

    /// Valid identity without the required role
    #[error("Access denied")]
    Forbidden,

    #[error("Storage failure")]
    Storage(#[from] StoreError),
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::Unauthenticated
    }
}
