//! Reservation lifecycle integration tests against an in-memory SQLite
//! database.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hotel_server::db::repository::{client, dashboard, reservation, room};
use hotel_server::reservations::{self, LifecycleError};
use shared::models::{
    ClientCreate, PaymentMethod, PaymentStatus, ReservationCreate, ReservationStatus,
    ReservationTransition, RoomCreate, RoomType,
};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_room(pool: &SqlitePool, number: &str, price: f64) -> i64 {
    room::create(
        pool,
        RoomCreate {
            number: number.into(),
            room_type: RoomType::Double,
            price,
            capacity: 2,
            status: None,
        },
    )
    .await
    .expect("Failed to create room")
    .id
}

async fn seed_client(pool: &SqlitePool, email: &str) -> i64 {
    client::create(
        pool,
        ClientCreate {
            first_name: "Marie".into(),
            last_name: "Curie".into(),
            email: email.into(),
            phone: None,
            document: None,
            document_type: None,
        },
    )
    .await
    .expect("Failed to create client")
    .id
}

async fn seed_reservation(pool: &SqlitePool, client_id: i64, room_id: i64) -> i64 {
    reservations::create(
        pool,
        ReservationCreate {
            client_id,
            room_id,
            check_in_date: date(2026, 3, 10),
            check_out_date: date(2026, 3, 13),
            status: None,
            payment_status: None,
            payment_method: None,
        },
    )
    .await
    .expect("Failed to create reservation")
    .reservation
    .id
}

#[tokio::test]
async fn total_amount_is_nights_times_price() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;

    let created = reservations::create(
        &pool,
        ReservationCreate {
            client_id,
            room_id,
            check_in_date: date(2026, 3, 10),
            check_out_date: date(2026, 3, 13),
            status: None,
            payment_status: None,
            payment_method: None,
        },
    )
    .await
    .expect("Failed to create reservation");

    // 3 nights x 100.0
    assert_eq!(created.reservation.total_amount, 300.0);
    assert_eq!(created.reservation.status, ReservationStatus::Confirmed);
    assert_eq!(created.reservation.payment_status, PaymentStatus::Pending);
    assert_eq!(
        created.reservation.payment_method,
        PaymentMethod::Undefined
    );
    assert_eq!(created.reservation.version, 1);
    assert_eq!(created.client.email, "marie@exemple.fr");
    assert_eq!(created.room.number, "101");
}

#[tokio::test]
async fn checkout_must_follow_checkin() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;

    let err = reservations::create(
        &pool,
        ReservationCreate {
            client_id,
            room_id,
            check_in_date: date(2026, 3, 13),
            check_out_date: date(2026, 3, 13),
            status: None,
            payment_status: None,
            payment_method: None,
        },
    )
    .await
    .expect_err("same-day checkout should be rejected");
    assert!(matches!(err, LifecycleError::InvalidDates(_)));
}

#[tokio::test]
async fn unknown_relations_are_rejected() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;

    let err = reservations::create(
        &pool,
        ReservationCreate {
            client_id: 424242,
            room_id,
            check_in_date: date(2026, 3, 10),
            check_out_date: date(2026, 3, 12),
            status: None,
            payment_status: None,
            payment_method: None,
        },
    )
    .await
    .expect_err("unknown client should be rejected");
    assert!(matches!(err, LifecycleError::NotFound(_)));
}

#[tokio::test]
async fn completion_is_gated_on_payment_method() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;
    let id = seed_reservation(&pool, client_id, room_id).await;

    let err = reservations::transition(
        &pool,
        id,
        ReservationTransition {
            status: Some(ReservationStatus::Completed),
            payment_status: None,
        },
    )
    .await
    .expect_err("completion without payment method should be gated");
    assert!(matches!(err, LifecycleError::PaymentMethodRequired));

    // The rejected transition must not have touched the record
    let stored = reservation::find_entity_by_id(&pool, id)
        .await
        .expect("Failed to load reservation")
        .expect("reservation should exist");
    assert_eq!(stored.status, ReservationStatus::Confirmed);
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert_eq!(stored.payment_method, PaymentMethod::Undefined);
    assert_eq!(stored.version, 1);

    reservations::set_payment_method(&pool, id, PaymentMethod::Card)
        .await
        .expect("Failed to set payment method");

    let updated = reservations::transition(
        &pool,
        id,
        ReservationTransition {
            status: Some(ReservationStatus::Completed),
            payment_status: None,
        },
    )
    .await
    .expect("completion should succeed once a method is set");

    // Terminée forces Payé
    assert_eq!(updated.reservation.status, ReservationStatus::Completed);
    assert_eq!(updated.reservation.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn terminal_reservation_is_locked() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;
    let id = seed_reservation(&pool, client_id, room_id).await;

    reservations::transition(
        &pool,
        id,
        ReservationTransition {
            status: Some(ReservationStatus::Cancelled),
            payment_status: None,
        },
    )
    .await
    .expect("cancellation should succeed");

    let locked = reservation::find_entity_by_id(&pool, id)
        .await
        .expect("Failed to load reservation")
        .expect("reservation should exist");

    let err = reservations::transition(
        &pool,
        id,
        ReservationTransition {
            status: Some(ReservationStatus::Confirmed),
            payment_status: None,
        },
    )
    .await
    .expect_err("locked reservation should reject transitions");
    assert!(matches!(err, LifecycleError::Locked));

    let err = reservations::set_payment_method(&pool, id, PaymentMethod::Cash)
        .await
        .expect_err("locked reservation should reject payment method changes");
    assert!(matches!(err, LifecycleError::Locked));

    let err = reservations::remove(&pool, id)
        .await
        .expect_err("locked reservation should reject deletion");
    assert!(matches!(err, LifecycleError::Locked));

    // None of the rejected operations left a trace on the record
    let stored = reservation::find_entity_by_id(&pool, id)
        .await
        .expect("Failed to load reservation")
        .expect("reservation should still exist");
    assert_eq!(stored.status, ReservationStatus::Cancelled);
    assert_eq!(stored.payment_status, locked.payment_status);
    assert_eq!(stored.payment_method, locked.payment_method);
    assert_eq!(stored.version, locked.version);
    assert_eq!(stored.updated_at, locked.updated_at);
}

#[tokio::test]
async fn stale_version_is_not_applied() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;
    let id = seed_reservation(&pool, client_id, room_id).await;

    let current = reservation::find_entity_by_id(&pool, id)
        .await
        .expect("Failed to load reservation")
        .expect("reservation should exist");

    let applied = reservation::update_lifecycle(
        &pool,
        id,
        current.version,
        ReservationStatus::InProgress,
        PaymentStatus::Pending,
    )
    .await
    .expect("update should run");
    assert!(applied);

    // Same expected version again: the row has moved on
    let applied = reservation::update_lifecycle(
        &pool,
        id,
        current.version,
        ReservationStatus::Confirmed,
        PaymentStatus::Pending,
    )
    .await
    .expect("update should run");
    assert!(!applied);
}

#[tokio::test]
async fn referenced_room_and_client_cannot_be_deleted() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;
    seed_reservation(&pool, client_id, room_id).await;

    assert!(room::delete(&pool, room_id).await.is_err());
    assert!(client::delete(&pool, client_id).await.is_err());
}

#[tokio::test]
async fn deleting_unlocked_reservation_frees_relations() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;
    let id = seed_reservation(&pool, client_id, room_id).await;

    assert!(reservations::remove(&pool, id).await.expect("delete"));
    assert!(room::delete(&pool, room_id).await.expect("room delete"));
    assert!(client::delete(&pool, client_id).await.expect("client delete"));
}

#[tokio::test]
async fn dashboard_aggregation_counts_booked_revenue() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "101", 100.0).await;
    let client_id = seed_client(&pool, "marie@exemple.fr").await;

    seed_reservation(&pool, client_id, room_id).await;
    let cancelled = seed_reservation(&pool, client_id, room_id).await;
    reservations::transition(
        &pool,
        cancelled,
        ReservationTransition {
            status: Some(ReservationStatus::Cancelled),
            payment_status: None,
        },
    )
    .await
    .expect("cancellation should succeed");

    // Booked revenue counts every reservation, paid or not
    let revenue = dashboard::total_revenue(&pool).await.expect("revenue");
    assert_eq!(revenue, 600.0);

    let checkins = dashboard::count_checkins_on(&pool, date(2026, 3, 10))
        .await
        .expect("count");
    assert_eq!(checkins, 2);
    let checkins = dashboard::count_checkins_on(&pool, date(2026, 3, 11))
        .await
        .expect("count");
    assert_eq!(checkins, 0);

    let groups = dashboard::monthly_groups(&pool, date(2026, 1, 1))
        .await
        .expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].ym, "2026-03");
    assert_eq!(groups[0].reservations, 2);
    assert_eq!(groups[0].revenue, 600.0);

    // Window start excludes older months
    let groups = dashboard::monthly_groups(&pool, date(2026, 4, 1))
        .await
        .expect("groups");
    assert!(groups.is_empty());
}
