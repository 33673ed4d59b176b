//! Dining Table Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{ParseEnumError, Timestamp};

/// Table occupancy status (桌台状态)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum TableStatus {
    #[default]
    Idle,
    Eating,
}

impl TableStatus {
    pub const ALL: [TableStatus; 2] = [TableStatus::Idle, TableStatus::Eating];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Idle => "IDLE",
            TableStatus::Eating => "EATING",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableStatus::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("table status", s))
    }
}

/// Dining table projection (桌台, passcode excluded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: String,
    pub name: String,
    pub seat: i32,
    pub status: TableStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full dining table row including the passcode hash.
/// Only returned by the passcode-inclusive accessor used for table login.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTableRecord {
    pub id: String,
    pub name: String,
    pub seat: i32,
    pub status: TableStatus,
    pub passcode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<DiningTableRecord> for DiningTable {
    fn from(r: DiningTableRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            seat: r.seat,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 200, message = "Invalid name"))]
    pub name: String,
    #[validate(range(min = 1, max = 100, message = "Invalid seat"))]
    pub seat: i32,
    #[validate(length(equal = 6, message = "Passcode must be 6 characters"))]
    pub passcode: String,
    #[serde(default)]
    pub status: Option<TableStatus>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[validate(length(min = 1, max = 200, message = "Invalid name"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 100, message = "Invalid seat"))]
    pub seat: Option<i32>,
    pub status: Option<TableStatus>,
    #[validate(length(equal = 6, message = "Passcode must be 6 characters"))]
    pub passcode: Option<String>,
}

/// `PATCH /tables/status/{id}` body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
