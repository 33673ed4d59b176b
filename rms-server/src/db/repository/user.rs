//! User Repository

use super::{RepoError, RepoResult, begin_write};
use crate::auth::hash_password;
use shared::models::{User, UserCreate, UserRecord, UserUpdate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, name, role, email, telephone, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Login lookup; includes the password hash
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, password, name, role, email, telephone, created_at, updated_at FROM users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let id = new_id();
    let now = now_millis();
    let password = hash_password(&data.password)?;

    sqlx::query(
        "INSERT INTO users (id, username, password, name, role, email, telephone, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.username)
    .bind(password)
    .bind(&data.name)
    .bind(data.role)
    .bind(&data.email)
    .bind(&data.telephone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Username '{}' already exists", data.username))
        }
        other => other,
    })?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Merge the supplied fields; a new password is re-hashed
pub async fn update_by_id(pool: &SqlitePool, id: &str, data: UserUpdate) -> RepoResult<User> {
    let password = data.password.as_deref().map(hash_password).transpose()?;

    let rows = sqlx::query(
        "UPDATE users SET username = COALESCE(?1, username), password = COALESCE(?2, password), name = COALESCE(?3, name), role = COALESCE(?4, role), email = COALESCE(?5, email), telephone = COALESCE(?6, telephone), updated_at = ?7 WHERE id = ?8",
    )
    .bind(&data.username)
    .bind(password)
    .bind(&data.name)
    .bind(data.role)
    .bind(&data.email)
    .bind(&data.telephone)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Username '{}' already exists",
            data.username.as_deref().unwrap_or_default()
        )),
        other => other,
    })?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Delete and return the removed user
pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> RepoResult<User> {
    let mut tx = begin_write(pool).await?;

    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user)
}
