//! Setting Repository

use super::RepoResult;
use shared::models::Setting;
use sqlx::SqlitePool;

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Setting>> {
    let setting = sqlx::query_as::<_, Setting>("SELECT name, value FROM settings WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(setting)
}

pub async fn upsert(pool: &SqlitePool, name: &str, value: &str) -> RepoResult<Setting> {
    let setting = sqlx::query_as::<_, Setting>(
        "INSERT INTO settings (name, value) VALUES (?, ?) ON CONFLICT(name) DO UPDATE SET value = excluded.value RETURNING name, value",
    )
    .bind(name)
    .bind(value)
    .fetch_one(pool)
    .await?;
    Ok(setting)
}
