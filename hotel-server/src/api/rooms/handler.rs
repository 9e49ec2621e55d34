//! Room API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::room;
use crate::utils::validation::{validate_non_negative, validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};
use shared::models::{Room, RoomCreate, RoomStatusUpdate};

/// GET /api/rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let room = room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {id}")))?;
    Ok(Json(room))
}

/// POST /api/rooms
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    validate_required_text(&payload.number, "number", MAX_NAME_LEN)?;
    validate_non_negative(payload.price, "price")?;
    if !(1..=10).contains(&payload.capacity) {
        return Err(AppError::field_validation(
            "capacity",
            "must be between 1 and 10",
        ));
    }

    let room = room::create(&state.pool, payload).await?;
    Ok(Json(room))
}

/// PUT /api/rooms/:id
///
/// Status is the only mutable room field.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomStatusUpdate>,
) -> AppResult<Json<Room>> {
    let room = room::update_status(&state.pool, id, payload.status).await?;
    Ok(Json(room))
}

/// DELETE /api/rooms/:id
///
/// Refused with a conflict while reservations still reference the room.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room {id}")));
    }
    Ok(Json(true))
}
