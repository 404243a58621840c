//! Note domain entity and response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Note domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Note as returned to its owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "Milk, eggs")]
    pub content: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
        }
    }
}

/// Note as returned to administrators, including the owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminNoteResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "Milk, eggs")]
    pub content: String,
    #[schema(example = 1)]
    pub user_id: i32,
}

impl From<Note> for AdminNoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            user_id: note.user_id,
        }
    }
}
