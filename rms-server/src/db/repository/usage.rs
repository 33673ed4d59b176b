//! Usage Repository
//!
//! A usage is opened by table login and closed by checkout. A table has at
//! most one active usage (`ended_at IS NULL`).

use super::{RepoError, RepoResult, begin_write};
use shared::models::{TableStatus, Usage};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Usage>> {
    let usage = sqlx::query_as::<_, Usage>(
        "SELECT id, table_id, started_at, ended_at FROM usages WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(usage)
}

pub async fn find_active_by_table(pool: &SqlitePool, table_id: &str) -> RepoResult<Option<Usage>> {
    let usage = sqlx::query_as::<_, Usage>(
        "SELECT id, table_id, started_at, ended_at FROM usages WHERE table_id = ? AND ended_at IS NULL ORDER BY started_at DESC LIMIT 1",
    )
    .bind(table_id)
    .fetch_optional(pool)
    .await?;
    Ok(usage)
}

/// Reuse the table's active usage or open a new one, and mark the table EATING
pub async fn open_or_get_active(pool: &SqlitePool, table_id: &str) -> RepoResult<Usage> {
    let mut tx = begin_write(pool).await?;
    let now = now_millis();

    let active = sqlx::query_as::<_, Usage>(
        "SELECT id, table_id, started_at, ended_at FROM usages WHERE table_id = ? AND ended_at IS NULL ORDER BY started_at DESC LIMIT 1",
    )
    .bind(table_id)
    .fetch_optional(&mut *tx)
    .await?;

    let usage = match active {
        Some(usage) => usage,
        None => {
            let usage = Usage {
                id: new_id(),
                table_id: table_id.to_string(),
                started_at: now,
                ended_at: None,
            };
            sqlx::query("INSERT INTO usages (id, table_id, started_at) VALUES (?, ?, ?)")
                .bind(&usage.id)
                .bind(&usage.table_id)
                .bind(usage.started_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| match RepoError::from(e) {
                    RepoError::InUse(_) => RepoError::NotFound(format!("Table {table_id} not found")),
                    other => other,
                })?;
            usage
        }
    };

    sqlx::query("UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ?")
        .bind(TableStatus::Eating)
        .bind(now)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(usage)
}

/// Close the table's active usage (if any) and mark the table IDLE
pub async fn close_active(pool: &SqlitePool, table_id: &str) -> RepoResult<Option<Usage>> {
    let mut tx = begin_write(pool).await?;
    let now = now_millis();

    let active = sqlx::query_as::<_, Usage>(
        "SELECT id, table_id, started_at, ended_at FROM usages WHERE table_id = ? AND ended_at IS NULL",
    )
    .bind(table_id)
    .fetch_optional(&mut *tx)
    .await?;

    sqlx::query("UPDATE usages SET ended_at = ? WHERE table_id = ? AND ended_at IS NULL")
        .bind(now)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ?")
        .bind(TableStatus::Idle)
        .bind(now)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(active.map(|usage| Usage {
        ended_at: Some(now),
        ..usage
    }))
}
