//! Client Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Client, ClientCreate, ClientUpdate};

const CLIENT_SELECT: &str = "SELECT id, first_name, last_name, email, phone, document, document_type, registration_date, created_at, updated_at FROM client";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Client>> {
    let sql = format!("{} ORDER BY created_at DESC", CLIENT_SELECT);
    let rows = sqlx::query_as::<_, Client>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let sql = format!("{} WHERE id = ?", CLIENT_SELECT);
    let row = sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Client>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{} WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR email LIKE ?1 OR phone LIKE ?1 ORDER BY created_at DESC",
        CLIENT_SELECT
    );
    let rows = sqlx::query_as::<_, Client>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let registration_date = chrono::Utc::now().date_naive();
    sqlx::query(
        "INSERT INTO client (id, first_name, last_name, email, phone, document, document_type, registration_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.document)
    .bind(&data.document_type)
    .bind(registration_date)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}

/// Partial update; email, document type and registration date are
/// immutable.
pub async fn update(pool: &SqlitePool, id: i64, data: ClientUpdate) -> RepoResult<Client> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE client SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), phone = COALESCE(?3, phone), document = COALESCE(?4, document), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.document)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Client {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))
}

/// Delete a client unless reservations still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referencing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation WHERE client_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if referencing > 0 {
        return Err(RepoError::Duplicate(format!(
            "Client {id} has {referencing} reservation(s) and cannot be deleted"
        )));
    }
    let rows = sqlx::query("DELETE FROM client WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
