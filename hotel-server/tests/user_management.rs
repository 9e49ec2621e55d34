//! User repository and settings integration tests against an in-memory
//! SQLite database.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hotel_server::db::repository::{setting, user, RepoError};
use shared::models::{HotelSettings, Role, Setting, User, PRIMARY_ADMIN_EMAIL};

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

#[tokio::test]
async fn primary_admin_is_seeded_once() {
    let pool = test_pool().await;

    user::ensure_primary_admin(&pool, "s3cret").await.expect("seed");
    user::ensure_primary_admin(&pool, "other-password")
        .await
        .expect("second seed is a no-op");

    let admin = user::find_by_email(&pool, PRIMARY_ADMIN_EMAIL)
        .await
        .expect("query")
        .expect("admin should exist");
    assert_eq!(admin.role, Role::Admin);
    // First password wins, the second call must not overwrite it
    assert!(admin.verify_password("s3cret").expect("verify"));
    assert!(!admin.verify_password("other-password").expect("verify"));

    let all = user::find_all(&pool).await.expect("list");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let pool = test_pool().await;
    let hash = User::hash_password("pw").expect("hash");

    user::create(&pool, "A", "staff@hotel.fr", &hash, Role::User)
        .await
        .expect("first create");
    let err = user::create(&pool, "B", "staff@hotel.fr", &hash, Role::User)
        .await
        .expect_err("duplicate email should fail");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let pool = test_pool().await;
    let hash = User::hash_password("pw").expect("hash");
    let created = user::create(&pool, "Jean", "jean@hotel.fr", &hash, Role::User)
        .await
        .expect("create");

    let updated = user::update(&pool, created.id, Some("Jean Dupont"), None, None, None)
        .await
        .expect("update");
    assert_eq!(updated.name, "Jean Dupont");
    assert_eq!(updated.email, "jean@hotel.fr");
    assert_eq!(updated.role, Role::User);
    assert!(updated.verify_password("pw").expect("verify"));
}

#[tokio::test]
async fn settings_defaults_are_seeded_and_upsertable() {
    let pool = test_pool().await;

    let rows = setting::find_all(&pool).await.expect("settings");
    let settings = HotelSettings::from_rows(&rows);
    assert_eq!(settings.hotel_name, "Mon Hôtel");
    assert!(settings.email_notifications);
    assert!(!settings.auto_checkout);

    let next = HotelSettings {
        hotel_name: "Grand Palace".into(),
        hotel_address: "1 rue de la Paix".into(),
        hotel_email: "contact@palace.fr".into(),
        hotel_phone: "+33 1 23 45 67 89".into(),
        email_notifications: false,
        auto_checkout: true,
    };
    setting::upsert_many(&pool, &next.to_rows()).await.expect("upsert");

    let rows = setting::find_all(&pool).await.expect("settings");
    assert_eq!(HotelSettings::from_rows(&rows), next);

    // Unknown keys survive alongside the typed view
    setting::upsert(&pool, "theme", "dark").await.expect("upsert extra");
    let rows = setting::find_all(&pool).await.expect("settings");
    assert!(rows.iter().any(|s: &Setting| s.key == "theme" && s.value == "dark"));
}
