//! Admin-only handlers.

use axum::{extract::State, response::Json, routing::get, Extension, Router};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::AdminNoteResponse;
use crate::errors::AppResult;

/// Create admin routes (mounted behind the auth middleware)
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/notes", get(list_all_notes))
}

/// List every user's notes
#[utoipa::path(
    get,
    path = "/api/admin/notes",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All notes", body = Vec<AdminNoteResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not currently an admin")
    )
)]
pub async fn list_all_notes(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AdminNoteResponse>>> {
    require_admin(&state, &current_user).await?;

    let notes = state.note_service.list_all_notes().await?;
    Ok(Json(notes.into_iter().map(AdminNoteResponse::from).collect()))
}
