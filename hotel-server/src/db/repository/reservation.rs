//! Reservation Repository
//!
//! Lifecycle rules (lock, payment gate, version checks) live in
//! `crate::reservations`; this module only talks SQL.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{
    Client, PaymentMethod, PaymentStatus, Reservation, ReservationStatus,
    ReservationWithRelations, Room, RoomStatus, RoomType,
};

const RESERVATION_SELECT: &str = "SELECT id, client_id, room_id, check_in_date, check_out_date, status, total_amount, payment_status, payment_method, version, created_at, updated_at FROM reservation";

const JOINED_SELECT: &str = "SELECT r.id, r.client_id, r.room_id, r.check_in_date, r.check_out_date, r.status, r.total_amount, r.payment_status, r.payment_method, r.version, r.created_at, r.updated_at, \
    c.first_name AS c_first_name, c.last_name AS c_last_name, c.email AS c_email, c.phone AS c_phone, c.document AS c_document, c.document_type AS c_document_type, c.registration_date AS c_registration_date, c.created_at AS c_created_at, c.updated_at AS c_updated_at, \
    rm.number AS rm_number, rm.room_type AS rm_room_type, rm.price AS rm_price, rm.capacity AS rm_capacity, rm.status AS rm_status, rm.created_at AS rm_created_at, rm.updated_at AS rm_updated_at \
    FROM reservation r JOIN client c ON r.client_id = c.id JOIN room rm ON r.room_id = rm.id";

/// Flat row produced by [`JOINED_SELECT`]
#[derive(sqlx::FromRow)]
struct JoinedRow {
    id: i64,
    client_id: i64,
    room_id: i64,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    status: ReservationStatus,
    total_amount: f64,
    payment_status: PaymentStatus,
    payment_method: PaymentMethod,
    version: i64,
    created_at: i64,
    updated_at: i64,
    c_first_name: String,
    c_last_name: String,
    c_email: String,
    c_phone: Option<String>,
    c_document: Option<String>,
    c_document_type: Option<String>,
    c_registration_date: NaiveDate,
    c_created_at: i64,
    c_updated_at: i64,
    rm_number: String,
    rm_room_type: RoomType,
    rm_price: f64,
    rm_capacity: i64,
    rm_status: RoomStatus,
    rm_created_at: i64,
    rm_updated_at: i64,
}

impl From<JoinedRow> for ReservationWithRelations {
    fn from(row: JoinedRow) -> Self {
        Self {
            reservation: Reservation {
                id: row.id,
                client_id: row.client_id,
                room_id: row.room_id,
                check_in_date: row.check_in_date,
                check_out_date: row.check_out_date,
                status: row.status,
                total_amount: row.total_amount,
                payment_status: row.payment_status,
                payment_method: row.payment_method,
                version: row.version,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            client: Client {
                id: row.client_id,
                first_name: row.c_first_name,
                last_name: row.c_last_name,
                email: row.c_email,
                phone: row.c_phone,
                document: row.c_document,
                document_type: row.c_document_type,
                registration_date: row.c_registration_date,
                created_at: row.c_created_at,
                updated_at: row.c_updated_at,
            },
            room: Room {
                id: row.room_id,
                number: row.rm_number,
                room_type: row.rm_room_type,
                price: row.rm_price,
                capacity: row.rm_capacity,
                status: row.rm_status,
                created_at: row.rm_created_at,
                updated_at: row.rm_updated_at,
            },
        }
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ReservationWithRelations>> {
    let sql = format!("{} ORDER BY r.created_at DESC", JOINED_SELECT);
    let rows = sqlx::query_as::<_, JoinedRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationWithRelations>> {
    let sql = format!("{} WHERE r.id = ?", JOINED_SELECT);
    let row = sqlx::query_as::<_, JoinedRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// The most recently created reservations, hydrated with relations
pub async fn find_recent(
    pool: &SqlitePool,
    limit: i64,
) -> RepoResult<Vec<ReservationWithRelations>> {
    let sql = format!("{} ORDER BY r.created_at DESC LIMIT ?", JOINED_SELECT);
    let rows = sqlx::query_as::<_, JoinedRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Bare reservation row, without relations
pub async fn find_entity_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{} WHERE id = ?", RESERVATION_SELECT);
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &SqlitePool,
    client_id: i64,
    room_id: i64,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    status: ReservationStatus,
    total_amount: f64,
    payment_status: PaymentStatus,
    payment_method: PaymentMethod,
) -> RepoResult<ReservationWithRelations> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO reservation (id, client_id, room_id, check_in_date, check_out_date, status, total_amount, payment_status, payment_method, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10, ?10)",
    )
    .bind(id)
    .bind(client_id)
    .bind(room_id)
    .bind(check_in_date)
    .bind(check_out_date)
    .bind(status)
    .bind(total_amount)
    .bind(payment_status)
    .bind(payment_method)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Compare-and-swap update of status and payment status.
///
/// Returns `false` when the expected version no longer matches (or the row
/// is gone); the caller distinguishes the two cases.
pub async fn update_lifecycle(
    pool: &SqlitePool,
    id: i64,
    expected_version: i64,
    status: ReservationStatus,
    payment_status: PaymentStatus,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, payment_status = ?2, version = version + 1, updated_at = ?3 WHERE id = ?4 AND version = ?5",
    )
    .bind(status)
    .bind(payment_status)
    .bind(now)
    .bind(id)
    .bind(expected_version)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Compare-and-swap update of the payment method.
pub async fn update_payment_method(
    pool: &SqlitePool,
    id: i64,
    expected_version: i64,
    payment_method: PaymentMethod,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET payment_method = ?1, version = version + 1, updated_at = ?2 WHERE id = ?3 AND version = ?4",
    )
    .bind(payment_method)
    .bind(now)
    .bind(id)
    .bind(expected_version)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
