//! Menu Repository

use super::{RepoError, RepoResult, begin_write};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const MENU_COLUMNS: &str = "id, name, price, description, is_available, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Menu>> {
    let menus = sqlx::query_as::<_, Menu>(&format!("SELECT {MENU_COLUMNS} FROM menus ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(menus)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Menu>> {
    let menu = sqlx::query_as::<_, Menu>(&format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(menu)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menus")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: MenuCreate) -> RepoResult<Menu> {
    let id = new_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO menus (id, name, price, description, is_available, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.description)
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Menu '{}' already exists", data.name))
        }
        other => other,
    })?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu".into()))
}

pub async fn update_by_id(pool: &SqlitePool, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
    let rows = sqlx::query(
        "UPDATE menus SET name = COALESCE(?1, name), price = COALESCE(?2, price), description = COALESCE(?3, description), is_available = COALESCE(?4, is_available), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.description)
    .bind(data.is_available)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Menu '{}' already exists",
            data.name.as_deref().unwrap_or_default()
        )),
        other => other,
    })?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
}

/// Delete and return the removed menu. Menus referenced by orders are kept.
pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Menu> {
    let mut tx = begin_write(pool).await?;

    let menu = sqlx::query_as::<_, Menu>(&format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))?;

    sqlx::query("DELETE FROM menus WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::InUse(_) => RepoError::InUse(format!("Menu '{}' has orders", menu.name)),
            other => other,
        })?;

    tx.commit().await?;
    Ok(menu)
}
