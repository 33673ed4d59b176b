//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatus, Page};
use uuid::Uuid;

use crate::auth::{CurrentClient, CurrentTable};
use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::{parse_enum, validate_payload};
use crate::utils::{AppError, AppResult};

/// GET /orders - 所有订单 (新到旧)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = order::find_all(state.pool()).await?;
    Ok(Json(orders))
}

/// POST /orders - 桌台下单，一次提交多个菜品
pub async fn create(
    State(state): State<ServerState>,
    table: CurrentTable,
    Json(items): Json<Vec<OrderCreate>>,
) -> AppResult<Json<Vec<Order>>> {
    for item in &items {
        validate_payload(item)?;
    }
    let orders = order::bulk_create(state.pool(), &table.usage_id, &items).await?;
    tracing::info!(
        table_id = %table.table_id,
        usage_id = %table.usage_id,
        count = orders.len(),
        "Orders placed"
    );
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    client: CurrentClient,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_by_id(state.pool(), &id.to_string())
        .await?
        .filter(|detail| match &client {
            CurrentClient::Table(table) => detail.usage.id == table.usage_id,
            CurrentClient::User(_) => true,
        })
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(detail))
}

/// GET /orders/status/{status}?take=&skip= - 按状态排队 (旧到新)
///
/// No match is an empty list, not a 404.
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
    Query(page): Query<Page>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let status: OrderStatus = parse_enum(&status)?;
    let orders = order::find_by_status(state.pool(), status, page).await?;
    Ok(Json(orders))
}

/// GET /orders/table/{id} - 桌台当前用餐的订单
pub async fn list_by_table(
    State(state): State<ServerState>,
    client: CurrentClient,
    Path(table_id): Path<Uuid>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let table_id = table_id.to_string();
    if let CurrentClient::Table(table) = &client {
        if table.table_id != table_id {
            return Err(AppError::forbidden("Orders of another table"));
        }
    }
    let orders = order::find_by_table_id(state.pool(), &table_id).await?;
    Ok(Json(orders))
}

async fn set_status(state: &ServerState, id: Uuid, status: OrderStatus) -> AppResult<Json<Order>> {
    let order = order::update_status_by_id(state.pool(), &id.to_string(), status).await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}

/// PATCH /orders/cancel/{id}
pub async fn cancel(State(state): State<ServerState>, Path(id): Path<Uuid>) -> AppResult<Json<Order>> {
    set_status(&state, id, OrderStatus::Canceled).await
}

/// PATCH /orders/serve/{id}
pub async fn serve(State(state): State<ServerState>, Path(id): Path<Uuid>) -> AppResult<Json<Order>> {
    set_status(&state, id, OrderStatus::Served).await
}

/// PATCH /orders/finish/{id}
pub async fn finish(State(state): State<ServerState>, Path(id): Path<Uuid>) -> AppResult<Json<Order>> {
    set_status(&state, id, OrderStatus::Finished).await
}
