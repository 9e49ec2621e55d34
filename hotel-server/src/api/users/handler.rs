//! User API Handlers
//!
//! Protection rules:
//! - the primary admin account cannot be deleted and its email and role
//!   cannot be changed
//! - an administrator cannot change their own role or delete themselves

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    validate_email, validate_required_text, MAX_NAME_LEN, MAX_PASSWORD_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::auth::UserInfo;
use shared::models::{Role, User, UserCreate, UserUpdate};

fn to_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    }
}

/// Reject updates that would weaken the primary admin or the caller's own
/// account.
fn ensure_update_allowed(
    target: &User,
    current_id: i64,
    payload: &UserUpdate,
) -> Result<(), AppError> {
    if let Some(email) = &payload.email {
        if target.is_primary_admin() && email != &target.email {
            return Err(AppError::forbidden(
                "Impossible de modifier l'email de l'administrateur principal.",
            ));
        }
    }
    if let Some(role) = payload.role {
        if target.is_primary_admin() && role != Role::Admin {
            return Err(AppError::forbidden(
                "Impossible de modifier le rôle de l'administrateur principal.",
            ));
        }
        if target.id == current_id && role != target.role {
            return Err(AppError::forbidden(
                "Impossible de modifier votre propre rôle.",
            ));
        }
    }
    Ok(())
}

/// Reject deletion of the primary admin or the caller's own account.
fn ensure_delete_allowed(target: &User, current_id: i64) -> Result<(), AppError> {
    if target.is_primary_admin() {
        return Err(AppError::forbidden(
            "Impossible de supprimer l'administrateur principal.",
        ));
    }
    if target.id == current_id {
        return Err(AppError::forbidden(
            "Impossible de supprimer votre propre compte.",
        ));
    }
    Ok(())
}

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let users = user::find_all(&state.pool).await?;
    Ok(Json(users.into_iter().map(to_info).collect()))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserInfo>> {
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;
    Ok(Json(to_info(user)))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let hash = User::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let role = payload.role.unwrap_or(Role::User);

    let created = user::create(&state.pool, &payload.name, &payload.email, &hash, role).await?;
    Ok(Json(to_info(created)))
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    let target = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email, "email")?;
    }
    ensure_update_allowed(&target, current.id, &payload)?;

    let password_hash = match &payload.password {
        Some(password) => {
            validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
            Some(
                User::hash_password(password)
                    .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?,
            )
        }
        None => None,
    };

    let updated = user::update(
        &state.pool,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        password_hash.as_deref(),
        payload.role,
    )
    .await?;
    Ok(Json(to_info(updated)))
}

/// DELETE /api/users/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let target = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

    ensure_delete_allowed(&target, current.id)?;

    let deleted = user::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PRIMARY_ADMIN_EMAIL;

    fn account(id: i64, email: &str, role: Role) -> User {
        User {
            id,
            name: "Test".into(),
            email: email.into(),
            password_hash: String::new(),
            role,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn primary_admin_email_is_immutable() {
        let target = account(1, PRIMARY_ADMIN_EMAIL, Role::Admin);
        let payload = UserUpdate {
            email: Some("autre@exemple.fr".into()),
            ..Default::default()
        };
        assert!(ensure_update_allowed(&target, 99, &payload).is_err());

        // Re-sending the same email is fine
        let payload = UserUpdate {
            email: Some(PRIMARY_ADMIN_EMAIL.into()),
            ..Default::default()
        };
        assert!(ensure_update_allowed(&target, 99, &payload).is_ok());
    }

    #[test]
    fn primary_admin_cannot_be_demoted() {
        let target = account(1, PRIMARY_ADMIN_EMAIL, Role::Admin);
        let payload = UserUpdate {
            role: Some(Role::User),
            ..Default::default()
        };
        assert!(ensure_update_allowed(&target, 99, &payload).is_err());
    }

    #[test]
    fn self_role_change_is_blocked() {
        let target = account(7, "staff@hotel.fr", Role::Admin);
        let payload = UserUpdate {
            role: Some(Role::User),
            ..Default::default()
        };
        assert!(ensure_update_allowed(&target, 7, &payload).is_err());
        // Another admin may demote them
        assert!(ensure_update_allowed(&target, 8, &payload).is_ok());
    }

    #[test]
    fn primary_admin_and_self_deletion_are_blocked() {
        let admin = account(1, PRIMARY_ADMIN_EMAIL, Role::Admin);
        assert!(ensure_delete_allowed(&admin, 99).is_err());

        let me = account(7, "staff@hotel.fr", Role::User);
        assert!(ensure_delete_allowed(&me, 7).is_err());
        assert!(ensure_delete_allowed(&me, 8).is_ok());
    }
}
