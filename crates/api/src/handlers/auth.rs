//! Handler for `POST /auth/login`.

use axum::extract::State;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::validation::normalize_email;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, ADMIN_ROLE};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate the configured admin. Email comparison ignores case.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let admin = state.config.admin.as_ref().ok_or_else(|| {
        tracing::warn!("Login attempted but no admin credentials are configured");
        invalid_credentials()
    })?;

    let email = normalize_email(&input.email);
    if email != normalize_email(&admin.email) {
        tracing::warn!(%email, "Login failed: unknown email");
        return Err(invalid_credentials());
    }

    let valid = verify_password(&input.password, &admin.password_hash).map_err(|e| {
        AppError::InternalError(format!("ADMIN_PASSWORD_HASH is not a valid PHC string: {e}"))
    })?;
    if !valid {
        tracing::warn!(%email, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(&email, ADMIN_ROLE, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(%email, "Admin logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}
