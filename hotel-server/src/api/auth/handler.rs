//! Authentication Handlers
//!
//! Login, logout and current-user endpoints.

use std::time::Duration;

use axum::{extract::State, Extension, Json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};
use shared::auth::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT token.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = user::find_by_email(&state.pool, &req.email)
        .await
        .map_err(AppError::from)?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let account = match account {
        Some(a) => {
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = account.id,
        email = %account.email,
        role = %account.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        access_token: token,
        user: UserInfo {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    // Fresh read so revoked accounts stop resolving immediately
    let account = user::find_by_id(&state.pool, current.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;

    Ok(Json(UserInfo {
        id: account.id,
        name: account.name,
        email: account.email,
        role: account.role,
    }))
}

/// POST /api/auth/logout
pub async fn logout(Extension(current): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(user_id = current.id, email = %current.email, "User logged out");
    Ok(Json(()))
}
