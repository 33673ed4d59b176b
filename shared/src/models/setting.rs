//! Setting Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Well-known setting: restaurant name shown in the dashboard header
pub const SETTING_NAME: &str = "NAME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub name: String,
    pub value: String,
}

/// `PUT /settings/{name}` body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SettingUpdate {
    #[validate(length(max = 500))]
    pub value: String,
}
