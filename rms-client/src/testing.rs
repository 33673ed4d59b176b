//! In-memory [`RmsApi`] for view tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, Menu, MenuSummary, Order, OrderCreate,
    OrderDetail, OrderStatus, Page, Role, Setting, TableStatus, TableSummary, UsageSummary, User,
    UserCreate, UserUpdate,
};
use shared::{LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};

use crate::{ClientError, ClientResult, RmsApi};

pub const PASSCODE: &str = "123456";

#[derive(Default)]
pub struct FakeApi {
    pub users: Mutex<Vec<User>>,
    pub tables: Mutex<Vec<DiningTable>>,
    pub orders: Mutex<Vec<OrderDetail>>,
    pub menus: Mutex<Vec<Menu>>,
    pub settings: Mutex<HashMap<String, String>>,
    pub session: Mutex<Option<SessionInfo>>,
    failure: Mutex<Option<u16>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every following call fails with `status`
    pub fn fail_with(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match *self.failure.lock().unwrap() {
            Some(code) => Err(ClientError::from_status(
                StatusCode::from_u16(code).unwrap(),
                "fake failure",
            )),
            None => Ok(()),
        }
    }

    fn set_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        let mut orders = self.orders.lock().unwrap();
        let detail = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Order {id} not found")))?;
        detail.status = status;
        Ok(Order {
            id: detail.id.clone(),
            menu_id: detail.menu.id.clone(),
            usage_id: detail.usage.id.clone(),
            quantity: detail.quantity,
            price: detail.price,
            status,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
        })
    }
}

pub fn user(id: &str, username: &str, role: Role) -> User {
    User {
        id: id.into(),
        username: username.into(),
        name: format!("{username} name"),
        role,
        email: None,
        telephone: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn table(id: &str, name: &str) -> DiningTable {
    DiningTable {
        id: id.into(),
        name: name.into(),
        seat: 4,
        status: TableStatus::Idle,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn menu(id: &str, name: &str, price: f64) -> Menu {
    Menu {
        id: id.into(),
        name: name.into(),
        price,
        description: None,
        is_available: true,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn order(id: &str, status: OrderStatus) -> OrderDetail {
    OrderDetail {
        id: id.into(),
        quantity: 1,
        price: 5.0,
        status,
        created_at: 0,
        updated_at: 0,
        menu: MenuSummary {
            id: "m1".into(),
            name: "Soup".into(),
        },
        usage: UsageSummary {
            id: "usage-1".into(),
            table: TableSummary {
                id: "t1".into(),
                name: "A1".into(),
            },
        },
    }
}

#[async_trait]
impl RmsApi for FakeApi {
    async fn login(&self, req: &LoginRequest) -> ClientResult<User> {
        self.record("login")?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == req.username)
            .cloned()
            .ok_or(ClientError::Unauthorized)
    }

    async fn table_login(&self, req: &TableLoginRequest) -> ClientResult<TableLoginResponse> {
        self.record("table_login")?;
        let id = req.id.to_string();
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::Unauthorized)?;
        if req.passcode != PASSCODE {
            return Err(ClientError::Unauthorized);
        }
        table.status = TableStatus::Eating;
        Ok(TableLoginResponse {
            usage_id: "usage-1".into(),
            table: table.clone(),
        })
    }

    async fn check_session(&self) -> ClientResult<SessionInfo> {
        self.record("check_session")?;
        self.session.lock().unwrap().clone().ok_or(ClientError::Unauthorized)
    }

    async fn logout(&self) -> ClientResult<()> {
        self.record("logout")?;
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn list_orders(&self) -> ClientResult<Vec<OrderDetail>> {
        self.record("list_orders")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn list_orders_by_status(
        &self,
        status: OrderStatus,
        page: Page,
    ) -> ClientResult<Vec<OrderDetail>> {
        self.record("list_orders_by_status")?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.status == status)
            .skip(page.skip.unwrap_or(0) as usize)
            .take(page.take.map_or(usize::MAX, |t| t as usize))
            .cloned()
            .collect())
    }

    async fn list_table_orders(&self, table_id: &str) -> ClientResult<Vec<OrderDetail>> {
        self.record("list_table_orders")?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.usage.table.id == table_id)
            .cloned()
            .collect())
    }

    async fn place_orders(&self, items: &[OrderCreate]) -> ClientResult<Vec<Order>> {
        self.record("place_orders")?;
        let menus = self.menus.lock().unwrap();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let menu_id = item.menu_id.to_string();
                let menu = menus
                    .iter()
                    .find(|m| m.id == menu_id)
                    .ok_or_else(|| ClientError::Validation(format!("Menu {menu_id} not found")))?;
                Ok(Order {
                    id: format!("o{i}"),
                    menu_id,
                    usage_id: "usage-1".into(),
                    quantity: item.quantity,
                    price: menu.price,
                    status: OrderStatus::Pending,
                    created_at: 0,
                    updated_at: 0,
                })
            })
            .collect()
    }

    async fn cancel_order(&self, id: &str) -> ClientResult<Order> {
        self.record("cancel_order")?;
        self.set_order_status(id, OrderStatus::Canceled)
    }

    async fn serve_order(&self, id: &str) -> ClientResult<Order> {
        self.record("serve_order")?;
        self.set_order_status(id, OrderStatus::Served)
    }

    async fn finish_order(&self, id: &str) -> ClientResult<Order> {
        self.record("finish_order")?;
        self.set_order_status(id, OrderStatus::Finished)
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.record("list_tables")?;
        Ok(self.tables.lock().unwrap().clone())
    }

    async fn count_tables(&self) -> ClientResult<i64> {
        self.record("count_tables")?;
        Ok(self.tables.lock().unwrap().len() as i64)
    }

    async fn create_table(&self, data: &DiningTableCreate) -> ClientResult<DiningTable> {
        self.record("create_table")?;
        let mut tables = self.tables.lock().unwrap();
        let created = DiningTable {
            status: data.status.unwrap_or_default(),
            seat: data.seat,
            ..table(&format!("t{}", tables.len() + 1), &data.name)
        };
        tables.push(created.clone());
        Ok(created)
    }

    async fn update_table(&self, id: &str, data: &DiningTableUpdate) -> ClientResult<DiningTable> {
        self.record("update_table")?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Table {id} not found")))?;
        if let Some(name) = &data.name {
            table.name = name.clone();
        }
        if let Some(seat) = data.seat {
            table.seat = seat;
        }
        if let Some(status) = data.status {
            table.status = status;
        }
        Ok(table.clone())
    }

    async fn delete_table(&self, id: &str) -> ClientResult<DiningTable> {
        self.record("delete_table")?;
        let mut tables = self.tables.lock().unwrap();
        let index = tables
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Table {id} not found")))?;
        Ok(tables.remove(index))
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.record("list_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count_users(&self) -> ClientResult<i64> {
        self.record("count_users")?;
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn create_user(&self, data: &UserCreate) -> ClientResult<User> {
        self.record("create_user")?;
        let mut users = self.users.lock().unwrap();
        let created = User {
            name: data.name.clone(),
            email: data.email.clone(),
            telephone: data.telephone.clone(),
            ..user(&format!("u{}", users.len() + 1), &data.username, data.role)
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: &str, data: &UserUpdate) -> ClientResult<User> {
        self.record("update_user")?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("User {id} not found")))?;
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        if data.email.is_some() {
            user.email = data.email.clone();
        }
        if data.telephone.is_some() {
            user.telephone = data.telephone.clone();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> ClientResult<User> {
        self.record("delete_user")?;
        let mut users = self.users.lock().unwrap();
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("User {id} not found")))?;
        Ok(users.remove(index))
    }

    async fn list_menus(&self) -> ClientResult<Vec<Menu>> {
        self.record("list_menus")?;
        Ok(self.menus.lock().unwrap().clone())
    }

    async fn count_menus(&self) -> ClientResult<i64> {
        self.record("count_menus")?;
        Ok(self.menus.lock().unwrap().len() as i64)
    }

    async fn get_setting(&self, name: &str) -> ClientResult<Setting> {
        self.record("get_setting")?;
        self.settings
            .lock()
            .unwrap()
            .get(name)
            .map(|value| Setting {
                name: name.to_string(),
                value: value.clone(),
            })
            .ok_or_else(|| ClientError::NotFound(format!("Setting {name} not found")))
    }
}
