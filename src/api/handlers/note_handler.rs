//! Note handlers for the authenticated caller's own notes.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::NoteResponse;
use crate::errors::AppResult;

/// Note creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be 1 to 120 characters"))]
    #[schema(example = "Groceries", max_length = 120)]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    #[schema(example = "Milk, eggs")]
    pub content: String,
}

/// Create note routes (mounted behind the auth middleware)
pub fn note_routes() -> Router<AppState> {
    Router::new().route("/", get(list_notes).post(create_note))
}

/// List the caller's notes
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's notes", body = Vec<NoteResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<NoteResponse>>> {
    let notes = state.note_service.list_notes(&current_user).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Create a note owned by the caller
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<NoteResponse>)> {
    let note = state
        .note_service
        .create_note(&current_user, payload.title, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}
