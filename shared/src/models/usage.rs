//! Usage Model
//!
//! A usage is one occupancy session of a table: opened at table login,
//! closed at checkout. Orders hang off the usage, not the table.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Usage {
    pub id: String,
    pub table_id: String,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
}

impl Usage {
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}
