//! Settings Repository

use sqlx::SqlitePool;

use super::RepoResult;
use shared::models::Setting;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Setting>> {
    let rows = sqlx::query_as::<_, Setting>("SELECT key, value FROM setting ORDER BY key")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO setting (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn upsert_many(pool: &SqlitePool, settings: &[Setting]) -> RepoResult<()> {
    for setting in settings {
        upsert(pool, &setting.key, &setting.value).await?;
    }
    Ok(())
}
