//! Order Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{ParseEnumError, Timestamp};

/// Order status (订单状态)
///
/// Transitions are not constrained: any status may be written over any
/// other through the PATCH endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Finished,
    Served,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Finished,
        OrderStatus::Served,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Finished => "FINISHED",
            OrderStatus::Served => "SERVED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("order status", s))
    }
}

/// Order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub menu_id: String,
    pub usage_id: String,
    pub quantity: i32,
    /// Menu price at the time the order was placed
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One line of a `POST /orders` body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    pub menu_id: Uuid,
    #[validate(range(min = 1, max = 99, message = "Invalid quantity"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub id: String,
    pub table: TableSummary,
}

/// Order joined with its menu item and the table it was placed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: String,
    pub quantity: i32,
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub menu: MenuSummary,
    pub usage: UsageSummary,
}

impl OrderDetail {
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// `?take=&skip=` for the status queue. No `take` means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub take: Option<u32>,
    pub skip: Option<u32>,
}

impl Page {
    pub fn new(take: u32, skip: u32) -> Self {
        Self {
            take: Some(take),
            skip: Some(skip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_path_segments() {
        assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("served".parse::<OrderStatus>().unwrap(), OrderStatus::Served);
        assert!("DONE".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&OrderStatus::Canceled).unwrap();
        assert_eq!(json, "\"CANCELED\"");
    }

    #[test]
    fn quantity_must_be_positive() {
        let line = OrderCreate {
            menu_id: Uuid::new_v4(),
            quantity: 0,
        };
        assert!(line.validate().is_err());

        let line = OrderCreate { quantity: 3, ..line };
        assert!(line.validate().is_ok());
    }

    #[test]
    fn detail_total_multiplies_snapshot_price() {
        let detail = OrderDetail {
            id: "o".into(),
            quantity: 3,
            price: 2.5,
            status: OrderStatus::Pending,
            created_at: 0,
            updated_at: 0,
            menu: MenuSummary {
                id: "m".into(),
                name: "Pho".into(),
            },
            usage: UsageSummary {
                id: "u".into(),
                table: TableSummary {
                    id: "t".into(),
                    name: "T1".into(),
                },
            },
        };
        assert_eq!(detail.total(), 7.5);
    }
}
