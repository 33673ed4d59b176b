//! Data models
//!
//! Shared between rms-server and rms-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4 strings, all timestamps Unix milliseconds.
//!
//! Types that carry a secret (`UserRecord`, `DiningTableRecord`) are not
//! `Serialize`; only their projections go over the wire.

pub mod dining_table;
pub mod menu;
pub mod order;
pub mod setting;
pub mod usage;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use setting::*;
pub use usage::*;
pub use user::*;
