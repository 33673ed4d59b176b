//! Dining Table Repository

use super::{RepoError, RepoResult, begin_write, usage};
use crate::auth::hash_password;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableRecord, DiningTableUpdate, TableStatus,
};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const TABLE_COLUMNS: &str = "id, name, seat, status, created_at, updated_at";

/// All tables, ordered by name (passcode excluded)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {TABLE_COLUMNS} FROM dining_tables ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Passcode-inclusive accessor, only used by table login
pub async fn find_by_id_with_passcode(
    pool: &SqlitePool,
    id: &str,
) -> RepoResult<Option<DiningTableRecord>> {
    let table = sqlx::query_as::<_, DiningTableRecord>(
        "SELECT id, name, seat, status, passcode, created_at, updated_at FROM dining_tables WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_tables")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let id = new_id();
    let now = now_millis();
    let passcode = hash_password(&data.passcode)?;

    sqlx::query(
        "INSERT INTO dining_tables (id, name, seat, status, passcode, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(data.seat)
    .bind(data.status.unwrap_or_default())
    .bind(passcode)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Table '{}' already exists", data.name))
        }
        other => other,
    })?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Merge the supplied fields; a new passcode is re-hashed
pub async fn update_by_id(
    pool: &SqlitePool,
    id: &str,
    data: DiningTableUpdate,
) -> RepoResult<DiningTable> {
    let passcode = data.passcode.as_deref().map(hash_password).transpose()?;

    let rows = sqlx::query(
        "UPDATE dining_tables SET name = COALESCE(?1, name), seat = COALESCE(?2, seat), status = COALESCE(?3, status), passcode = COALESCE(?4, passcode), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(data.seat)
    .bind(data.status)
    .bind(passcode)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Table '{}' already exists",
            data.name.as_deref().unwrap_or_default()
        )),
        other => other,
    })?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Overwrite the status, whatever it was
pub async fn update_status_by_id(
    pool: &SqlitePool,
    id: &str,
    status: TableStatus,
) -> RepoResult<DiningTable> {
    let rows = sqlx::query("UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Close the table's active usage and set it back to IDLE
pub async fn checkout(pool: &SqlitePool, id: &str) -> RepoResult<DiningTable> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    usage::close_active(pool, id).await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Delete and return the removed table. Tables with usage history are kept.
pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> RepoResult<DiningTable> {
    let mut tx = begin_write(pool).await?;

    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

    sqlx::query("DELETE FROM dining_tables WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::InUse(_) => {
                RepoError::InUse(format!("Table '{}' has usage history", table.name))
            }
            other => other,
        })?;

    tx.commit().await?;
    Ok(table)
}
