//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::note::{self, ActiveModel, Entity as NoteEntity};
use crate::domain::Note;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Note repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create a note owned by `user_id`
    async fn create(&self, user_id: i32, title: String, content: String) -> Result<Note, DbErr>;

    /// List notes owned by `user_id`, oldest first
    async fn list_by_owner(&self, user_id: i32) -> Result<Vec<Note>, DbErr>;

    /// List every note, oldest first
    async fn list_all(&self) -> Result<Vec<Note>, DbErr>;
}

/// Concrete implementation of NoteRepository
pub struct NoteStore {
    db: DatabaseConnection,
}

impl NoteStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for NoteStore {
    async fn create(&self, user_id: i32, title: String, content: String) -> Result<Note, DbErr> {
        let active_model = ActiveModel {
            title: Set(title),
            content: Set(content),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Note::from(model))
    }

    async fn list_by_owner(&self, user_id: i32) -> Result<Vec<Note>, DbErr> {
        let models = NoteEntity::find()
            .filter(note::Column::UserId.eq(user_id))
            .order_by_asc(note::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Note::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Note>, DbErr> {
        let models = NoteEntity::find()
            .order_by_asc(note::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Note::from).collect())
    }
}
