//! 仪表盘摘要

use std::sync::Arc;

use shared::models::{OrderStatus, Page};

use crate::views::state::{Loadable, Notice};
use crate::{ClientResult, RmsApi};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub tables: i64,
    pub users: i64,
    pub menus: i64,
    pub pending_orders: i64,
}

pub struct Dashboard {
    api: Arc<dyn RmsApi>,
    pub summary: Loadable<DashboardSummary>,
    pub notice: Option<Notice>,
}

/// A 404 on a count reads as zero
fn count_or_zero(result: ClientResult<i64>) -> ClientResult<i64> {
    match result {
        Err(e) if e.is_not_found() => Ok(0),
        other => other,
    }
}

impl Dashboard {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            summary: Loadable::Loading,
            notice: None,
        }
    }

    async fn fetch(&self) -> ClientResult<DashboardSummary> {
        let (tables, users, menus, pending) = tokio::join!(
            self.api.count_tables(),
            self.api.count_users(),
            self.api.count_menus(),
            self.api.list_orders_by_status(OrderStatus::Pending, Page::default()),
        );
        let pending_orders = count_or_zero(pending.map(|orders| orders.len() as i64))?;

        Ok(DashboardSummary {
            tables: count_or_zero(tables)?,
            users: count_or_zero(users)?,
            menus: count_or_zero(menus)?,
            pending_orders,
        })
    }

    pub async fn load(&mut self) {
        self.summary = Loadable::Loading;
        match self.fetch().await {
            Ok(summary) => self.summary = Loadable::Ready(summary),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dashboard");
                self.summary = Loadable::Failed;
                self.notice = Some(Notice::generic());
            }
        }
    }
}
