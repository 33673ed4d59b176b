//! Order Repository
//!
//! Reads return [`OrderDetail`] (order joined with its menu item and table);
//! writes return the bare [`Order`] row.

use super::{RepoError, RepoResult, begin_write};
use shared::models::{
    MenuSummary, Order, OrderCreate, OrderDetail, OrderStatus, Page, TableSummary, Usage,
    UsageSummary,
};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const DETAIL_SELECT: &str = "SELECT o.id, o.quantity, o.price, o.status, o.created_at, o.updated_at, \
     m.id AS menu_id, m.name AS menu_name, u.id AS usage_id, t.id AS table_id, t.name AS table_name \
     FROM orders o \
     JOIN menus m ON m.id = o.menu_id \
     JOIN usages u ON u.id = o.usage_id \
     JOIN dining_tables t ON t.id = u.table_id";

const ORDER_COLUMNS: &str =
    "id, menu_id, usage_id, quantity, price, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderDetailRow {
    id: String,
    quantity: i32,
    price: f64,
    status: OrderStatus,
    created_at: i64,
    updated_at: i64,
    menu_id: String,
    menu_name: String,
    usage_id: String,
    table_id: String,
    table_name: String,
}

impl From<OrderDetailRow> for OrderDetail {
    fn from(row: OrderDetailRow) -> Self {
        Self {
            id: row.id,
            quantity: row.quantity,
            price: row.price,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            menu: MenuSummary {
                id: row.menu_id,
                name: row.menu_name,
            },
            usage: UsageSummary {
                id: row.usage_id,
                table: TableSummary {
                    id: row.table_id,
                    name: row.table_name,
                },
            },
        }
    }
}

/// Every order, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderDetail>> {
    let rows = sqlx::query_as::<_, OrderDetailRow>(&format!(
        "{DETAIL_SELECT} ORDER BY o.created_at DESC, o.rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(OrderDetail::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<OrderDetail>> {
    let row = sqlx::query_as::<_, OrderDetailRow>(&format!("{DETAIL_SELECT} WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(OrderDetail::from))
}

/// Queue view: orders in `status`, oldest first. No `take` means no limit.
pub async fn find_by_status(
    pool: &SqlitePool,
    status: OrderStatus,
    page: Page,
) -> RepoResult<Vec<OrderDetail>> {
    // SQLite treats a negative LIMIT as unbounded
    let limit = page.take.map(i64::from).unwrap_or(-1);
    let offset = page.skip.map(i64::from).unwrap_or(0);

    let rows = sqlx::query_as::<_, OrderDetailRow>(&format!(
        "{DETAIL_SELECT} WHERE o.status = ? ORDER BY o.created_at ASC, o.rowid ASC LIMIT ? OFFSET ?"
    ))
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(OrderDetail::from).collect())
}

/// Orders of the table's active usage
pub async fn find_by_table_id(pool: &SqlitePool, table_id: &str) -> RepoResult<Vec<OrderDetail>> {
    let rows = sqlx::query_as::<_, OrderDetailRow>(&format!(
        "{DETAIL_SELECT} WHERE u.table_id = ? AND u.ended_at IS NULL ORDER BY o.created_at ASC, o.rowid ASC"
    ))
    .bind(table_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(OrderDetail::from).collect())
}

/// Insert one PENDING order per item for `usage_id`, all or nothing
///
/// Each row copies the menu's current price. An unknown or unavailable menu,
/// or a closed usage, rolls back the whole batch.
pub async fn bulk_create(
    pool: &SqlitePool,
    usage_id: &str,
    items: &[OrderCreate],
) -> RepoResult<Vec<Order>> {
    if items.is_empty() {
        return Err(RepoError::Validation(
            "Order must contain at least one item".into(),
        ));
    }

    let mut tx = begin_write(pool).await?;

    let usage = sqlx::query_as::<_, Usage>(
        "SELECT id, table_id, started_at, ended_at FROM usages WHERE id = ?",
    )
    .bind(usage_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Usage {usage_id} not found")))?;
    if !usage.is_active() {
        return Err(RepoError::Validation(format!("Usage {usage_id} is closed")));
    }

    let now = now_millis();
    let mut orders = Vec::with_capacity(items.len());

    for item in items {
        let menu_id = item.menu_id.to_string();
        let menu: Option<(String, f64, bool)> =
            sqlx::query_as("SELECT name, price, is_available FROM menus WHERE id = ?")
                .bind(&menu_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((name, price, is_available)) = menu else {
            return Err(RepoError::Validation(format!("Menu {menu_id} not found")));
        };
        if !is_available {
            return Err(RepoError::Validation(format!("Menu '{name}' is not available")));
        }

        let order = Order {
            id: new_id(),
            menu_id,
            usage_id: usage.id.clone(),
            quantity: item.quantity,
            price,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&order.id)
        .bind(&order.menu_id)
        .bind(&order.usage_id)
        .bind(order.quantity)
        .bind(order.price)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        orders.push(order);
    }

    tx.commit().await?;
    Ok(orders)
}

/// Overwrite the status, whatever it was
pub async fn update_status_by_id(
    pool: &SqlitePool,
    id: &str,
    status: OrderStatus,
) -> RepoResult<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? RETURNING {ORDER_COLUMNS}"
    ))
    .bind(status)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;
    Ok(order)
}
