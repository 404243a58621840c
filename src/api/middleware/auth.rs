//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{AuthenticatedContext, UserRole};
use crate::errors::AppError;

/// Authenticated caller, inserted into request extensions
pub type CurrentUser = AuthenticatedContext;

/// Authentication middleware.
///
/// Extracts and verifies the bearer token from the Authorization header,
/// then injects the caller's [`CurrentUser`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let current_user = state.auth_service.require_authenticated(token)?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_bearer)
        .ok_or(AppError::Unauthorized)
}

/// Split `<scheme> <token>`; the scheme name is case-insensitive.
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(TOKEN_TYPE_BEARER) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Require the caller to currently hold `role`, as recorded in the
/// credential store.
pub async fn require_role(
    state: &AppState,
    user: &CurrentUser,
    role: UserRole,
) -> Result<(), AppError> {
    Ok(state.auth_service.authorize(user, role).await?)
}

/// Require the admin role.
pub async fn require_admin(state: &AppState, user: &CurrentUser) -> Result<(), AppError> {
    require_role(state, user, UserRole::Admin).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_scheme_case_insensitive() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(parse_bearer("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(parse_bearer("BEARER  abc.def.ghi "), Some("abc.def.ghi"));
    }

    #[test]
    fn test_parse_bearer_rejects_other_input() {
        for header in ["", "Bearer", "Bearer ", "Basic dXNlcjpwdw==", "Bearerabc", "Token abc"] {
            assert_eq!(parse_bearer(header), None, "accepted {:?}", header);
        }
    }
}
