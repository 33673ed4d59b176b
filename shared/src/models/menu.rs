//! Menu Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Timestamp;

/// Menu item (菜品)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub is_available: Option<bool>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub is_available: Option<bool>,
}
