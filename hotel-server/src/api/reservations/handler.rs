//! Reservation API Handlers
//!
//! Thin HTTP layer over `crate::reservations`, which owns the lifecycle
//! rules.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::core::ServerState;
use crate::db::repository::{reservation, setting};
use crate::invoice;
use crate::reservations as lifecycle;
use crate::utils::{AppError, AppResult};
use shared::models::{
    HotelSettings, PaymentMethodUpdate, ReservationCreate, ReservationTransition,
    ReservationWithRelations,
};

/// GET /api/reservations
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ReservationWithRelations>>> {
    let reservations = reservation::find_all(&state.pool).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationWithRelations>> {
    let reservation = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id}")))?;
    Ok(Json(reservation))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ReservationWithRelations>> {
    let created = lifecycle::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PATCH /api/reservations/:id
///
/// Transitions status and/or payment status.
pub async fn transition(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationTransition>,
) -> AppResult<Json<ReservationWithRelations>> {
    let updated = lifecycle::transition(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// PATCH /api/reservations/:id/method
pub async fn set_payment_method(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentMethodUpdate>,
) -> AppResult<Json<ReservationWithRelations>> {
    let updated = lifecycle::set_payment_method(&state.pool, id, payload.payment_method).await?;
    Ok(Json(updated))
}

/// DELETE /api/reservations/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = lifecycle::remove(&state.pool, id).await?;
    Ok(Json(deleted))
}

/// GET /api/reservations/:id/invoice
///
/// Renders the invoice as an HTML download.
pub async fn invoice(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let reservation = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id}")))?;

    let settings_rows = setting::find_all(&state.pool).await?;
    let settings = HotelSettings::from_rows(&settings_rows);

    let html = invoice::render(&reservation, &settings);
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/html; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", invoice::filename(id)),
        ),
    ];

    Ok((headers, html))
}
