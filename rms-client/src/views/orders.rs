//! 订单队列和历史页
//!
//! The chef works the PENDING queue (finish or cancel), staff work the
//! FINISHED queue (serve). Rows leave the queue locally after a successful
//! transition; the queue is not refetched.

use std::sync::Arc;

use shared::models::{OrderDetail, OrderStatus, Page};

use crate::views::state::{Loadable, Notice};
use crate::{ClientError, ClientResult, RmsApi};

pub struct OrderQueue {
    api: Arc<dyn RmsApi>,
    status: OrderStatus,
    page: Page,
    pub orders: Loadable<Vec<OrderDetail>>,
    pub notice: Option<Notice>,
}

impl OrderQueue {
    pub fn new(api: Arc<dyn RmsApi>, status: OrderStatus) -> Self {
        Self {
            api,
            status,
            page: Page::default(),
            orders: Loadable::Loading,
            notice: None,
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Fetch the queue; a 404 shows an empty queue
    pub async fn load(&mut self) {
        self.orders = Loadable::Loading;
        let result = self.api.list_orders_by_status(self.status, self.page).await;
        let (orders, notice) = Loadable::from_list(result);
        self.orders = orders;
        if notice.is_some() {
            self.notice = notice;
        }
    }

    fn remove(&mut self, id: &str) {
        if let Some(orders) = self.orders.ready_mut() {
            orders.retain(|o| o.id != id);
        }
    }

    fn settle(&mut self, id: &str, result: ClientResult<()>, success: &str) -> ClientResult<()> {
        match &result {
            Ok(()) => {
                self.remove(id);
                self.notice = Some(Notice::success(success));
            }
            Err(e) => {
                tracing::warn!(order_id = %id, error = %e, "Order transition failed");
                self.notice = Some(Notice::generic());
            }
        }
        result
    }

    /// PATCH finish and drop the row
    pub async fn finish(&mut self, id: &str) -> ClientResult<()> {
        let result = self.api.finish_order(id).await.map(|_| ());
        self.settle(id, result, "Order finished")
    }

    /// PATCH serve and drop the row
    pub async fn serve(&mut self, id: &str) -> ClientResult<()> {
        let result = self.api.serve_order(id).await.map(|_| ());
        self.settle(id, result, "Order served")
    }

    /// Cancel after `confirm` approves the row. Returns `Ok(false)` when
    /// the user backs out; nothing is sent in that case.
    ///
    /// Only rows shown in the loaded queue can be canceled.
    pub async fn cancel<F>(&mut self, id: &str, confirm: F) -> ClientResult<bool>
    where
        F: FnOnce(&OrderDetail) -> bool,
    {
        let Some(row) = self
            .orders
            .ready()
            .and_then(|orders| orders.iter().find(|o| o.id == id))
        else {
            return Err(ClientError::NotFound(format!("Order {id} is not in the queue")));
        };
        if !confirm(row) {
            return Ok(false);
        }

        let result = self.api.cancel_order(id).await.map(|_| ());
        self.settle(id, result, "Order canceled").map(|()| true)
    }
}

/// 历史订单 (所有状态，新到旧)
pub struct OrderHistory {
    api: Arc<dyn RmsApi>,
    pub orders: Loadable<Vec<OrderDetail>>,
    pub notice: Option<Notice>,
}

impl OrderHistory {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            orders: Loadable::Loading,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        self.orders = Loadable::Loading;
        let (orders, notice) = Loadable::from_list(self.api.list_orders().await);
        self.orders = orders;
        self.notice = notice;
    }

    /// Sum of `price * quantity` over non-canceled orders
    pub fn revenue(&self) -> f64 {
        self.orders.ready().map_or(0.0, |orders| {
            orders
                .iter()
                .filter(|o| o.status != OrderStatus::Canceled)
                .map(OrderDetail::total)
                .sum()
        })
    }
}
