//! Access gate - Authentication and role authorization for protected
//! operations.
//!
//! `authenticate` proves identity from a bearer token. `authorize` checks the
//! identity's current role in the credential store, never the role embedded
//! in the token, so a demotion takes effect before old tokens expire.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::token_service::TokenService;
use crate::domain::{AuthError, AuthenticatedContext, UserRole};
use crate::infra::UserRepository;

/// Check that `context`'s identity currently holds `required_role`, and
/// return the context carrying that stored role.
///
/// An identity missing from the store is refused like a role mismatch.
pub async fn admit(
    context: &AuthenticatedContext,
    required_role: UserRole,
    store: &dyn UserRepository,
) -> Result<AuthenticatedContext, AuthError> {
    match store.find_by_username(&context.username).await? {
        Some(identity) if identity.role == required_role => Ok(AuthenticatedContext {
            username: identity.username,
            role: identity.role,
        }),
        Some(identity) => {
            tracing::debug!(
                username = %context.username,
                current_role = %identity.role,
                required_role = %required_role,
                "Role check failed"
            );
            Err(AuthError::Forbidden)
        }
        None => {
            tracing::debug!(username = %context.username, "Role check for unknown identity");
            Err(AuthError::Forbidden)
        }
    }
}

/// Check that `context`'s identity currently holds `required_role`.
pub async fn authorize(
    context: &AuthenticatedContext,
    required_role: UserRole,
    store: &dyn UserRepository,
) -> Result<(), AuthError> {
    admit(context, required_role, store).await.map(|_| ())
}

/// Guard composed in front of protected operations.
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Verify `token` against the current time.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        self.authenticate_at(token, Utc::now())
    }

    /// Verify `token` as of `now`. Every verification failure is reported
    /// as `Unauthenticated`; the reason is only logged.
    pub fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedContext, AuthError> {
        self.tokens.verify(token, now).map_err(|e| {
            tracing::debug!(reason = %e, "Rejected bearer token");
            AuthError::from(e)
        })
    }

    /// Check the current role of an authenticated identity and return the
    /// context with the stored role.
    pub async fn admit(
        &self,
        context: &AuthenticatedContext,
        required_role: UserRole,
    ) -> Result<AuthenticatedContext, AuthError> {
        admit(context, required_role, self.users.as_ref()).await
    }

    /// Check the current role of an authenticated identity.
    pub async fn authorize(
        &self,
        context: &AuthenticatedContext,
        required_role: UserRole,
    ) -> Result<(), AuthError> {
        authorize(context, required_role, self.users.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{Identity, StoreError};
    use crate::infra::MockUserRepository;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn identity(username: &str, role: UserRole) -> Identity {
        Identity {
            id: 1,
            username: username.to_string(),
            password_hash: "hashed".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn context(username: &str, role: UserRole) -> AuthenticatedContext {
        AuthenticatedContext {
            username: username.to_string(),
            role,
        }
    }

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            &Config::new("test-secret-key-for-testing-only-32chars").unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_authorize_current_role_matches() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("root"))
            .returning(|name| Ok(Some(identity(name, UserRole::Admin))));

        let result = authorize(&context("root", UserRole::Admin), UserRole::Admin, &repo).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_uses_store_role_not_token_role() {
        // Token still says admin, store says the user was demoted
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(identity(name, UserRole::User))));

        let result = authorize(&context("root", UserRole::Admin), UserRole::Admin, &repo).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_authorize_promotion_visible_immediately() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(identity(name, UserRole::Admin))));

        let result = authorize(&context("alice", UserRole::User), UserRole::Admin, &repo).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_admit_returns_stored_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(identity(name, UserRole::Admin))));

        let admitted = admit(&context("alice", UserRole::User), UserRole::Admin, &repo)
            .await
            .unwrap();
        assert_eq!(admitted, context("alice", UserRole::Admin));
    }

    #[tokio::test]
    async fn test_authorize_unknown_identity_forbidden() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let result = authorize(&context("ghost", UserRole::Admin), UserRole::Admin, &repo).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_authorize_admin_does_not_satisfy_user_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(identity(name, UserRole::Admin))));

        let result = authorize(&context("root", UserRole::Admin), UserRole::User, &repo).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_authorize_store_failure_is_not_admission() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(StoreError::Database(sea_orm::DbErr::Custom("down".into()))));

        let result = authorize(&context("root", UserRole::Admin), UserRole::Admin, &repo).await;
        assert!(matches!(result, Err(AuthError::Storage(_))));
    }

    #[test]
    fn test_authenticate_hides_failure_kind() {
        let tokens = tokens();
        let gate = AccessGate::new(tokens.clone(), Arc::new(MockUserRepository::new()));
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        let ok = gate.authenticate_at(token.as_str(), now).unwrap();
        assert_eq!(ok, context("alice", UserRole::User));

        let expired = gate.authenticate_at(token.as_str(), token.expires_at + Duration::seconds(1));
        assert!(matches!(expired, Err(AuthError::Unauthenticated)));

        let garbage = gate.authenticate("garbage");
        assert!(matches!(garbage, Err(AuthError::Unauthenticated)));
    }
}
