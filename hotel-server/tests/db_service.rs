//! Database bootstrap tests: file-backed pool, migrations, admin seeding.

use hotel_server::db::repository::{setting, user};
use hotel_server::db::DbService;
use shared::models::{HotelSettings, Role, PRIMARY_ADMIN_EMAIL};

#[tokio::test]
async fn opens_file_database_and_applies_migrations() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hotel.db");
    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("Failed to open database");

    // Migrations seeded the default settings
    let rows = setting::find_all(&db.pool).await.expect("settings");
    let settings = HotelSettings::from_rows(&rows);
    assert_eq!(settings.hotel_name, "Mon Hôtel");

    // Re-opening the same file is idempotent
    drop(db);
    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("Failed to re-open database");
    let rows = setting::find_all(&db.pool).await.expect("settings");
    assert!(!rows.is_empty());
}

#[tokio::test]
async fn admin_seeding_survives_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hotel.db");
    let path = db_path.to_str().expect("utf-8 path");

    let db = DbService::new(path).await.expect("Failed to open database");
    user::ensure_primary_admin(&db.pool, "admin123")
        .await
        .expect("seed");
    drop(db);

    let db = DbService::new(path).await.expect("Failed to re-open database");
    let admin = user::find_by_email(&db.pool, PRIMARY_ADMIN_EMAIL)
        .await
        .expect("query")
        .expect("admin should persist");
    assert_eq!(admin.role, Role::Admin);
}
