//! RMS API 抽象
//!
//! 视图模型只依赖这个 trait，测试时用内存实现替换网络客户端。

use async_trait::async_trait;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, Menu, Order, OrderCreate, OrderDetail,
    OrderStatus, Page, Setting, User, UserCreate, UserUpdate,
};
use shared::{LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};

use crate::ClientResult;

#[async_trait]
pub trait RmsApi: Send + Sync {
    // ========== Auth ==========
    async fn login(&self, req: &LoginRequest) -> ClientResult<User>;
    async fn table_login(&self, req: &TableLoginRequest) -> ClientResult<TableLoginResponse>;
    async fn check_session(&self) -> ClientResult<SessionInfo>;
    async fn logout(&self) -> ClientResult<()>;

    // ========== Orders ==========
    async fn list_orders(&self) -> ClientResult<Vec<OrderDetail>>;
    async fn list_orders_by_status(
        &self,
        status: OrderStatus,
        page: Page,
    ) -> ClientResult<Vec<OrderDetail>>;
    async fn list_table_orders(&self, table_id: &str) -> ClientResult<Vec<OrderDetail>>;
    async fn place_orders(&self, items: &[OrderCreate]) -> ClientResult<Vec<Order>>;
    async fn cancel_order(&self, id: &str) -> ClientResult<Order>;
    async fn serve_order(&self, id: &str) -> ClientResult<Order>;
    async fn finish_order(&self, id: &str) -> ClientResult<Order>;

    // ========== Tables ==========
    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>>;
    async fn count_tables(&self) -> ClientResult<i64>;
    async fn create_table(&self, data: &DiningTableCreate) -> ClientResult<DiningTable>;
    async fn update_table(&self, id: &str, data: &DiningTableUpdate) -> ClientResult<DiningTable>;
    async fn delete_table(&self, id: &str) -> ClientResult<DiningTable>;

    // ========== Users ==========
    async fn list_users(&self) -> ClientResult<Vec<User>>;
    async fn count_users(&self) -> ClientResult<i64>;
    async fn create_user(&self, data: &UserCreate) -> ClientResult<User>;
    async fn update_user(&self, id: &str, data: &UserUpdate) -> ClientResult<User>;
    async fn delete_user(&self, id: &str) -> ClientResult<User>;

    // ========== Menus ==========
    async fn list_menus(&self) -> ClientResult<Vec<Menu>>;
    async fn count_menus(&self) -> ClientResult<i64>;

    // ========== Settings ==========
    async fn get_setting(&self, name: &str) -> ClientResult<Setting>;
}
