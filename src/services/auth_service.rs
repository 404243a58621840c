//! Authentication service - Registration, login and access checks.
//!
//! Password hashing is delegated to `domain::password`, token handling to
//! [`TokenService`], access checks to [`AccessGate`].

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::access_gate::AccessGate;
use super::token_service::{Token, TokenService};
use crate::config::{Config, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH};
use crate::domain::{
    password, AuthError, AuthenticatedContext, Identity, LoginError, NewIdentity, RegisterError,
    UserRole,
};
use crate::infra::UnitOfWork;

/// Usernames end up in tokens and logs, so keep them to a plain charset.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@-]+$").expect("username pattern is valid"));

/// Hash checked when the username is unknown, so both login failures cost
/// one Argon2 verification.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| password::hash("timing-equalization-placeholder").ok());

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new identity with the default role
    async fn register(&self, username: String, password: String) -> Result<Identity, RegisterError>;

    /// Check credentials and issue a token
    async fn login(&self, username: String, password: String) -> Result<Token, LoginError>;

    /// Admit any holder of a valid token
    fn require_authenticated(&self, token: &str) -> Result<AuthenticatedContext, AuthError>;

    /// Admit a valid token whose identity currently holds `role`. The
    /// returned context carries the stored role, not the token's.
    async fn require_role(
        &self,
        token: &str,
        role: UserRole,
    ) -> Result<AuthenticatedContext, AuthError>;

    /// Role check for an already authenticated context
    async fn authorize(
        &self,
        context: &AuthenticatedContext,
        role: UserRole,
    ) -> Result<(), AuthError>;
}

/// Validate registration input.
fn validate_registration(username: &str, password: &str) -> Result<(), RegisterError> {
    if username.is_empty() {
        return Err(RegisterError::InvalidInput("Username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH as usize {
        return Err(RegisterError::InvalidInput(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(RegisterError::InvalidInput(
            "Username may only contain letters, digits and . _ @ -".into(),
        ));
    }
    if password.is_empty() {
        return Err(RegisterError::InvalidInput("Password is required".into()));
    }
    if password.len() > MAX_PASSWORD_LENGTH as usize {
        return Err(RegisterError::InvalidInput(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<TokenService>,
    gate: AccessGate,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: &Config) -> Self {
        let tokens = Arc::new(TokenService::new(config));
        let gate = AccessGate::new(tokens.clone(), uow.users());
        Self { uow, tokens, gate }
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, password: String) -> Result<Identity, RegisterError> {
        validate_registration(&username, &password)?;

        // The unique index still settles concurrent registrations
        if self.uow.users().find_by_username(&username).await?.is_some() {
            return Err(RegisterError::UsernameTaken);
        }

        let password_hash = tokio::task::spawn_blocking(move || password::hash(&password))
            .await
            .map_err(|e| RegisterError::Internal(e.to_string()))??;

        let identity = self
            .uow
            .users()
            .insert(NewIdentity::new(username, password_hash))
            .await?;

        tracing::info!(username = %identity.username, "User registered");
        Ok(identity)
    }

    async fn login(&self, username: String, password: String) -> Result<Token, LoginError> {
        let identity = self.uow.users().find_by_username(&username).await?;

        let stored_hash = identity
            .as_ref()
            .map(|i| i.password_hash.clone())
            .or_else(|| DUMMY_HASH.clone())
            .unwrap_or_default();

        let password_valid =
            tokio::task::spawn_blocking(move || password::verify(&password, &stored_hash))
                .await
                .map_err(|e| LoginError::Internal(e.to_string()))?;

        let identity = match identity {
            Some(identity) if password_valid => identity,
            _ => {
                tracing::warn!(username = %username, "Failed login attempt");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&identity.username, identity.role, Utc::now())?;
        tracing::info!(username = %identity.username, "User logged in");
        Ok(token)
    }

    fn require_authenticated(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        self.gate.authenticate(token)
    }

    async fn require_role(
        &self,
        token: &str,
        role: UserRole,
    ) -> Result<AuthenticatedContext, AuthError> {
        let context = self.gate.authenticate(token)?;
        self.gate.admit(&context, role).await
    }

    async fn authorize(
        &self,
        context: &AuthenticatedContext,
        role: UserRole,
    ) -> Result<(), AuthError> {
        self.gate.authorize(context, role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration_accepts_plain_input() {
        assert!(validate_registration("alice", "pw1").is_ok());
        assert!(validate_registration("jane.doe@example.com", "x").is_ok());
    }

    #[test]
    fn test_validate_registration_rejects_bad_input() {
        let cases = [
            ("", "pw"),
            ("alice", ""),
            ("al ice", "pw"),
            (" alice", "pw"),
            ("alice\n", "pw"),
        ];
        for (username, password) in cases {
            assert!(
                matches!(
                    validate_registration(username, password),
                    Err(RegisterError::InvalidInput(_))
                ),
                "accepted {:?}",
                username
            );
        }

        let long_name = "a".repeat(MAX_USERNAME_LENGTH as usize + 1);
        assert!(validate_registration(&long_name, "pw").is_err());

        let long_password = "p".repeat(MAX_PASSWORD_LENGTH as usize + 1);
        assert!(validate_registration("alice", &long_password).is_err());
    }

    #[test]
    fn test_dummy_hash_is_valid_phc() {
        let dummy = DUMMY_HASH.clone().unwrap();
        assert!(!password::verify("alice-password", &dummy));
        assert!(password::verify("timing-equalization-placeholder", &dummy));
    }
}
