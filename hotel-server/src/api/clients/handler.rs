//! Client API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::validation::{
    validate_email, validate_optional_text, validate_required_text, MAX_NAME_LEN,
    MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Client, ClientCreate, ClientUpdate};

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/clients
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/clients/search?q=xxx
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = client::search(&state.pool, &query.q).await?;
    Ok(Json(clients))
}

/// GET /api/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Client {id}")))?;
    Ok(Json(client))
}

fn validate_create(payload: &ClientCreate) -> AppResult<()> {
    validate_required_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.document, "document", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.document_type, "documentType", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// POST /api/clients
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    validate_create(&payload)?;
    let client = client::create(&state.pool, payload).await?;
    Ok(Json(client))
}

/// PATCH /api/clients/:id
///
/// Email and registration date are immutable and absent from the payload.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    if let Some(first_name) = &payload.first_name {
        validate_required_text(first_name, "firstName", MAX_NAME_LEN)?;
    }
    if let Some(last_name) = &payload.last_name {
        validate_required_text(last_name, "lastName", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.document, "document", MAX_SHORT_TEXT_LEN)?;

    let client = client::update(&state.pool, id, payload).await?;
    Ok(Json(client))
}

/// DELETE /api/clients/:id
///
/// Refused with a conflict while reservations still reference the client.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = client::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Client {id}")));
    }
    Ok(Json(true))
}
