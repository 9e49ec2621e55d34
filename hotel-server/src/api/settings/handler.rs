//! Settings API Handlers

use axum::{extract::State, Json};

use crate::core::ServerState;
use crate::db::repository::setting;
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_ADDRESS_LEN, MAX_NAME_LEN,
};
use crate::utils::AppResult;
use shared::models::HotelSettings;

/// GET /api/settings
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<HotelSettings>> {
    let rows = setting::find_all(&state.pool).await?;
    Ok(Json(HotelSettings::from_rows(&rows)))
}

/// PUT /api/settings
///
/// Upserts the full typed settings view into the key/value table.
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<HotelSettings>,
) -> AppResult<Json<HotelSettings>> {
    validate_required_text(&payload.hotel_name, "hotelName", MAX_NAME_LEN)?;
    validate_optional_text(
        &Some(payload.hotel_address.clone()),
        "hotelAddress",
        MAX_ADDRESS_LEN,
    )?;

    setting::upsert_many(&state.pool, &payload.to_rows()).await?;

    let rows = setting::find_all(&state.pool).await?;
    Ok(Json(HotelSettings::from_rows(&rows)))
}
