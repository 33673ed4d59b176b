//! 桌台管理页

use std::sync::Arc;

use shared::models::DiningTable;

use crate::views::forms::TableForm;
use crate::views::state::{Loadable, Notice};
use crate::{ClientError, ClientResult, RmsApi};

pub struct TableAdmin {
    api: Arc<dyn RmsApi>,
    pub tables: Loadable<Vec<DiningTable>>,
    pub notice: Option<Notice>,
}

impl TableAdmin {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            tables: Loadable::Loading,
            notice: None,
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

    fn ensure_unique(&self, name: &str, exclude_id: Option<&str>) -> ClientResult<()> {
        let taken = self.tables.ready().is_some_and(|tables| {
            tables
                .iter()
                .any(|t| t.name == name && Some(t.id.as_str()) != exclude_id)
        });
        if taken {
            return Err(ClientError::Conflict("Table name already exists".into()));
        }
        Ok(())
    }

    fn settle<T>(&mut self, result: ClientResult<T>, success: &str) -> ClientResult<T> {
        self.notice = Some(match &result {
            Ok(_) => Notice::success(success),
            Err(e) => Notice::from_error(e),
        });
        result
    }

    pub async fn create(&mut self, form: &TableForm) -> ClientResult<DiningTable> {
        let result = self.try_create(form).await;
        self.settle(result, "Table created")
    }

    async fn try_create(&mut self, form: &TableForm) -> ClientResult<DiningTable> {
        let payload = form.to_create()?;
        self.ensure_unique(&payload.name, None)?;
        let table = self.api.create_table(&payload).await?;
        if let Some(tables) = self.tables.ready_mut() {
            tables.push(table.clone());
            tables.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(table)
    }

    /// Validate, check for a duplicate name, PATCH and replace the row
    pub async fn edit(&mut self, id: &str, form: &TableForm) -> ClientResult<DiningTable> {
        let result = self.try_edit(id, form).await;
        self.settle(result, "Table updated")
    }

    async fn try_edit(&mut self, id: &str, form: &TableForm) -> ClientResult<DiningTable> {
        let payload = form.to_update()?;
        if let Some(name) = &payload.name {
            self.ensure_unique(name, Some(id))?;
        }
        let table = self.api.update_table(id, &payload).await?;
        if let Some(row) = self
            .tables
            .ready_mut()
            .and_then(|tables| tables.iter_mut().find(|t| t.id == table.id))
        {
            *row = table.clone();
        }
        Ok(table)
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<DiningTable> {
        let result = self.api.delete_table(id).await;
        if let (Ok(table), Some(tables)) = (&result, self.tables.ready_mut()) {
            tables.retain(|t| t.id != table.id);
        }
        self.settle(result, "Table deleted")
    }
}
