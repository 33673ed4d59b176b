//! 点餐购物车 (桌台端)

use std::sync::Arc;

use shared::models::{Menu, Order, OrderCreate};
use uuid::Uuid;

use crate::views::state::Notice;
use crate::{ClientError, ClientResult, RmsApi};

/// Max quantity per line, matching the server's order payload limit
pub const MAX_QUANTITY: i32 = 99;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu: Menu,
    pub quantity: i32,
}

pub struct OrderCart {
    api: Arc<dyn RmsApi>,
    pub lines: Vec<CartLine>,
    pub notice: Option<Notice>,
}

impl OrderCart {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            lines: Vec::new(),
            notice: None,
        }
    }

    /// Add one of `menu`, merging with an existing line
    pub fn add(&mut self, menu: &Menu) {
        match self.lines.iter_mut().find(|l| l.menu.id == menu.id) {
            Some(line) => line.quantity = (line.quantity + 1).min(MAX_QUANTITY),
            None => self.lines.push(CartLine {
                menu: menu.clone(),
                quantity: 1,
            }),
        }
    }

    /// Remove one of `menu_id`; the line disappears at zero
    pub fn remove(&mut self, menu_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu.id == menu_id) {
            line.quantity -= 1;
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.menu.price * f64::from(l.quantity))
            .sum()
    }

    fn items(&self) -> ClientResult<Vec<OrderCreate>> {
        if self.lines.is_empty() {
            return Err(ClientError::Validation("Cart is empty".into()));
        }
        self.lines
            .iter()
            .map(|line| {
                let menu_id = Uuid::parse_str(&line.menu.id)
                    .map_err(|_| ClientError::InvalidResponse(format!("Menu id {}", line.menu.id)))?;
                Ok(OrderCreate {
                    menu_id,
                    quantity: line.quantity,
                })
            })
            .collect()
    }

    /// Submit every line as one batch; the cart empties on success
    pub async fn place(&mut self) -> ClientResult<Vec<Order>> {
        let result = match self.items() {
            Ok(items) => self.api.place_orders(&items).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(orders) => {
                self.lines.clear();
                self.notice = Some(Notice::success(format!("{} items ordered", orders.len())));
            }
            Err(e) => self.notice = Some(Notice::from_error(e)),
        }
        result
    }
}
