//! 仪表盘外框: 会话检查、标题、导航

use std::sync::Arc;

use shared::SessionInfo;
use shared::models::SETTING_NAME;

use crate::RmsApi;
use crate::views::navigation::{NavItem, nav_items};

pub const DEFAULT_TITLE: &str = "RMS";
pub const LOGIN_PATH: &str = "/login";

pub struct Layout {
    api: Arc<dyn RmsApi>,
    /// Stored session; cleared when the server no longer accepts it
    pub session: Option<SessionInfo>,
    pub title: String,
    /// Set when the client must go to the login screen
    pub redirect: Option<&'static str>,
}

impl Layout {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            session: None,
            title: DEFAULT_TITLE.to_string(),
            redirect: None,
        }
    }

    /// Check the session and load the restaurant name
    pub async fn load(&mut self) {
        match self.api.check_session().await {
            Ok(session) => {
                self.session = Some(session);
                self.redirect = None;
            }
            Err(e) => {
                tracing::info!(error = %e, "Session check failed, redirecting to login");
                self.session = None;
                self.redirect = Some(LOGIN_PATH);
            }
        }

        self.title = match self.api.get_setting(SETTING_NAME).await {
            Ok(setting) if !setting.value.trim().is_empty() => setting.value,
            _ => DEFAULT_TITLE.to_string(),
        };
    }

    pub fn nav(&self) -> &'static [NavItem] {
        let role = self
            .session
            .as_ref()
            .and_then(|s| s.role)
            .map(|r| r.as_str());
        nav_items(role)
    }

    /// Log out and drop the stored session
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.session = None;
        self.redirect = Some(LOGIN_PATH);
    }
}
