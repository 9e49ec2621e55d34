//! Room Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Room, RoomCreate, RoomStatus};

const ROOM_SELECT: &str = "SELECT id, number, room_type, price, capacity, status, created_at, updated_at FROM room";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let sql = format!("{} ORDER BY number", ROOM_SELECT);
    let rows = sqlx::query_as::<_, Room>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let sql = format!("{} WHERE id = ?", ROOM_SELECT);
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let status = data.status.unwrap_or(RoomStatus::Available);
    sqlx::query(
        "INSERT INTO room (id, number, room_type, price, capacity, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.number)
    .bind(data.room_type)
    .bind(data.price)
    .bind(data.capacity)
    .bind(status)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: RoomStatus) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE room SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Delete a room. Fails with [`RepoError::Duplicate`] mapped upstream to a
/// conflict when reservations still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referencing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation WHERE room_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if referencing > 0 {
        return Err(RepoError::Duplicate(format!(
            "Room {id} has {referencing} reservation(s) and cannot be deleted"
        )));
    }
    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM room")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_by_status(pool: &SqlitePool, status: RoomStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM room WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
