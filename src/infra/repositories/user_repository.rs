//! User repository - the credential store behind the authentication core.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Identity, NewIdentity, StoreError, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find identity by its unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    /// Insert a new identity; fails with `UsernameTaken` on a duplicate
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError>;

    /// Replace an identity's role
    async fn update_role(&self, username: &str, role: UserRole) -> Result<Identity, StoreError>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-index violation to `UsernameTaken`, anything else to a
/// database error.
fn insert_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::UsernameTaken,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(Identity::try_from).transpose()?)
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let active_model = ActiveModel {
            username: Set(identity.username),
            password_hash: Set(identity.password_hash),
            role: Set(identity.role.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        Ok(Identity::try_from(model)?)
    }

    async fn update_role(&self, username: &str, role: UserRole) -> Result<Identity, StoreError> {
        let user = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.role = Set(role.to_string());

        let model = active.update(&self.db).await?;
        Ok(Identity::try_from(model)?)
    }
}
