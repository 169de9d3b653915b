//! Admin guard for the `/admin` routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use folio_core::error::CoreError;

use crate::auth::jwt::{validate_token, ADMIN_ROLE};
use crate::error::AppError;
use crate::state::AppState;

/// The logged-in site owner.
///
/// Taking `AdminUser` as a handler argument is what makes the route
/// admin-only:
///
/// ```ignore
/// async fn delete(admin: AdminUser, Path(id): Path<DbId>) -> AppResult<StatusCode> {
///     tracing::info!(admin = %admin.email, id, "deleting");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
///
/// Missing, malformed, or expired tokens reject with 401. A valid token
/// without the admin role rejects with 403.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Login email, taken from the token subject.
    pub email: String,
}

fn unauthorized(reason: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(reason.to_string()))
}

/// The token part of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid ASCII"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Expected: Authorization: Bearer <token>"))
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        if claims.role != ADMIN_ROLE {
            tracing::warn!(sub = %claims.sub, role = %claims.role, "Non-admin token rejected");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }

        Ok(AdminUser { email: claims.sub })
    }
}
