//! 视图状态模型
//!
//! Each screen follows fetch-on-load: `load()` issues the read request and
//! stores the outcome in a [`Loadable`]; mutations update the loaded rows
//! locally instead of refetching.

pub mod cart;
pub mod dashboard;
pub mod forms;
pub mod layout;
pub mod navigation;
pub mod orders;
pub mod state;
pub mod table_selector;
pub mod tables;
pub mod users;

pub use cart::OrderCart;
pub use dashboard::{Dashboard, DashboardSummary};
pub use forms::{TableForm, UserForm};
pub use layout::Layout;
pub use navigation::{NavItem, nav_items};
pub use orders::{OrderHistory, OrderQueue};
pub use state::{GENERIC_ERROR, Loadable, Notice};
pub use table_selector::TableSelector;
pub use tables::TableAdmin;
pub use users::UserAdmin;
