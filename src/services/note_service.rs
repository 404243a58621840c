//! Note service - Per-user notes and the admin-wide listing.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MAX_NOTE_TITLE_LENGTH;
use crate::domain::{AuthenticatedContext, Identity, Note};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Note service trait for dependency injection.
///
/// Callers pass the context produced by the access gate; role checks for
/// `list_all_notes` happen before it is called.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// Create a note owned by the caller
    async fn create_note(
        &self,
        owner: &AuthenticatedContext,
        title: String,
        content: String,
    ) -> AppResult<Note>;

    /// List the caller's own notes
    async fn list_notes(&self, owner: &AuthenticatedContext) -> AppResult<Vec<Note>>;

    /// List every note of every user
    async fn list_all_notes(&self) -> AppResult<Vec<Note>>;
}

/// Concrete implementation of NoteService using Unit of Work.
pub struct NoteManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NoteManager<U> {
    /// Create new note service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve the caller's stored identity. An account that vanished after
    /// the token was issued no longer authenticates.
    async fn owner(&self, context: &AuthenticatedContext) -> AppResult<Identity> {
        self.uow
            .users()
            .find_by_username(&context.username)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

fn validate_note(title: &str, content: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH as usize {
        return Err(AppError::validation(format!(
            "Title must be at most {} characters",
            MAX_NOTE_TITLE_LENGTH
        )));
    }
    if content.is_empty() {
        return Err(AppError::validation("Content is required"));
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> NoteService for NoteManager<U> {
    async fn create_note(
        &self,
        owner: &AuthenticatedContext,
        title: String,
        content: String,
    ) -> AppResult<Note> {
        validate_note(&title, &content)?;
        let identity = self.owner(owner).await?;

        let note = self.uow.notes().create(identity.id, title, content).await?;
        tracing::debug!(note_id = note.id, username = %identity.username, "Note created");
        Ok(note)
    }

    async fn list_notes(&self, owner: &AuthenticatedContext) -> AppResult<Vec<Note>> {
        let identity = self.owner(owner).await?;
        Ok(self.uow.notes().list_by_owner(identity.id).await?)
    }

    async fn list_all_notes(&self) -> AppResult<Vec<Note>> {
        Ok(self.uow.notes().list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infra::{MockNoteRepository, MockUserRepository, NoteRepository, UserRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
        notes: Arc<MockNoteRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn notes(&self) -> Arc<dyn NoteRepository> {
            self.notes.clone()
        }
    }

    fn service(users: MockUserRepository, notes: MockNoteRepository) -> NoteManager<TestUnitOfWork> {
        NoteManager::new(Arc::new(TestUnitOfWork {
            users: Arc::new(users),
            notes: Arc::new(notes),
        }))
    }

    fn alice() -> AuthenticatedContext {
        AuthenticatedContext {
            username: "alice".to_string(),
            role: UserRole::User,
        }
    }

    fn users_with_alice() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|name| {
            Ok(Some(Identity {
                id: 7,
                username: name.to_string(),
                password_hash: "hashed".to_string(),
                role: UserRole::User,
                created_at: Utc::now(),
            }))
        });
        users
    }

    fn note(id: i32, user_id: i32) -> Note {
        Note {
            id,
            title: format!("note {}", id),
            content: "body".to_string(),
            user_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_note_for_owner() {
        let mut notes = MockNoteRepository::new();
        notes
            .expect_create()
            .withf(|user_id, title, content| *user_id == 7 && title == "Groceries" && content == "Milk")
            .returning(|user_id, title, content| {
                Ok(Note {
                    id: 1,
                    title,
                    content,
                    user_id,
                    created_at: Utc::now(),
                })
            });

        let service = service(users_with_alice(), notes);
        let created = service
            .create_note(&alice(), "Groceries".into(), "Milk".into())
            .await
            .unwrap();

        assert_eq!(created.user_id, 7);
        assert_eq!(created.title, "Groceries");
    }

    #[tokio::test]
    async fn test_create_note_validates_before_storage() {
        let service = service(MockUserRepository::new(), MockNoteRepository::new());

        let empty_title = service.create_note(&alice(), "  ".into(), "x".into()).await;
        assert!(matches!(empty_title, Err(AppError::Validation(_))));

        let long_title = "t".repeat(MAX_NOTE_TITLE_LENGTH as usize + 1);
        let too_long = service.create_note(&alice(), long_title, "x".into()).await;
        assert!(matches!(too_long, Err(AppError::Validation(_))));

        let empty_content = service.create_note(&alice(), "t".into(), "".into()).await;
        assert!(matches!(empty_content, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_notes_scoped_to_owner() {
        let mut notes = MockNoteRepository::new();
        notes
            .expect_list_by_owner()
            .with(eq(7))
            .returning(|user_id| Ok(vec![note(1, user_id), note(3, user_id)]));

        let service = service(users_with_alice(), notes);
        let listed = service.list_notes(&alice()).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|n| n.user_id == 7));
    }

    #[tokio::test]
    async fn test_vanished_owner_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let service = service(users, MockNoteRepository::new());
        let result = service.list_notes(&alice()).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_list_all_notes() {
        let mut notes = MockNoteRepository::new();
        notes
            .expect_list_all()
            .returning(|| Ok(vec![note(1, 7), note(2, 8)]));

        let service = service(MockUserRepository::new(), notes);
        let listed = service.list_all_notes().await.unwrap();

        assert_eq!(listed.len(), 2);
    }
}
