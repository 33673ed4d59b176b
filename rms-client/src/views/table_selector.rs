//! 桌台选择 (点餐端登录)

use std::sync::Arc;

use shared::models::DiningTable;
use shared::{TableLoginRequest, TableLoginResponse};
use uuid::Uuid;

use crate::views::state::{Loadable, Notice};
use crate::{ClientError, ClientResult, RmsApi};

pub const MIN_PASSCODE_LEN: usize = 6;

pub struct TableSelector {
    api: Arc<dyn RmsApi>,
    pub tables: Loadable<Vec<DiningTable>>,
    pub selected: Option<String>,
    pub passcode: String,
    pub notice: Option<Notice>,
    /// Set once the table session is established
    pub session: Option<TableLoginResponse>,
}

impl TableSelector {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            tables: Loadable::Loading,
            selected: None,
            passcode: String::new(),
            notice: None,
            session: None,
        }
    }

    pub async fn load(&mut self) {
        self.tables = Loadable::Loading;
        match self.api.list_tables().await {
            Ok(tables) => self.tables = Loadable::Ready(tables),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load tables");
                self.tables = Loadable::Failed;
                self.notice = Some(Notice::generic());
            }
        }
    }

    pub fn select(&mut self, table_id: impl Into<String>) {
        self.selected = Some(table_id.into());
    }

    fn request(&self) -> ClientResult<TableLoginRequest> {
        let selected = self
            .selected
            .as_deref()
            .ok_or_else(|| ClientError::Validation("Please select a table".into()))?;
        if self.passcode.chars().count() < MIN_PASSCODE_LEN {
            return Err(ClientError::Validation(format!(
                "Passcode must be at least {MIN_PASSCODE_LEN} characters"
            )));
        }
        let id = Uuid::parse_str(selected)
            .map_err(|_| ClientError::Validation("Please select a table".into()))?;
        Ok(TableLoginRequest {
            id,
            passcode: self.passcode.clone(),
        })
    }

    /// Log in as the selected table; a 401 reads "Invalid passcode"
    pub async fn submit(&mut self) -> ClientResult<TableLoginResponse> {
        let result = match self.request() {
            Ok(request) => self.api.table_login(&request).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(session) => {
                self.notice = None;
                self.session = Some(session.clone());
            }
            Err(ClientError::Unauthorized) => {
                self.notice = Some(Notice::error("Invalid passcode"));
            }
            Err(e) => self.notice = Some(Notice::from_error(e)),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, PASSCODE, table};
    use shared::models::TableStatus;

    const TABLE_ID: &str = "6f1c2a7e-6a43-4a4e-9d3b-1f2e3d4c5b6a";

    fn api() -> Arc<FakeApi> {
        let api = FakeApi::new();
        api.tables.lock().unwrap().push(table(TABLE_ID, "A1"));
        api
    }

    #[tokio::test]
    async fn requires_selection_and_passcode_length() {
        let api = api();
        let mut selector = TableSelector::new(api.clone());
        selector.load().await;

        selector.passcode = PASSCODE.into();
        assert!(matches!(selector.submit().await, Err(ClientError::Validation(_))));

        selector.select(TABLE_ID);
        selector.passcode = "123".into();
        assert!(matches!(selector.submit().await, Err(ClientError::Validation(_))));
        assert_eq!(api.calls(), vec!["list_tables"]);
    }

    #[tokio::test]
    async fn wrong_passcode_reads_invalid_passcode() {
        let mut selector = TableSelector::new(api());
        selector.select(TABLE_ID);
        selector.passcode = "654321".into();

        assert!(selector.submit().await.is_err());
        assert_eq!(selector.notice, Some(Notice::error("Invalid passcode")));
        assert!(selector.session.is_none());
    }

    #[tokio::test]
    async fn successful_login_keeps_session() {
        let mut selector = TableSelector::new(api());
        selector.select(TABLE_ID);
        selector.passcode = PASSCODE.into();

        let session = selector.submit().await.unwrap();
        assert_eq!(session.table.status, TableStatus::Eating);
        assert_eq!(selector.session.as_ref().unwrap().usage_id, "usage-1");
    }
}
