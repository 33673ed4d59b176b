//! 按角色的导航菜单

use shared::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Menus,
    Tables,
    Users,
    History,
    Settings,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Menus => "Menus",
            NavItem::Tables => "Tables",
            NavItem::Users => "Users",
            NavItem::History => "History",
            NavItem::Settings => "Settings",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "/dashboard",
            NavItem::Menus => "/dashboard/menus",
            NavItem::Tables => "/dashboard/tables",
            NavItem::Users => "/dashboard/users",
            NavItem::History => "/dashboard/history",
            NavItem::Settings => "/dashboard/settings",
        }
    }
}

const MANAGER_NAV: &[NavItem] = &[
    NavItem::Dashboard,
    NavItem::Menus,
    NavItem::Tables,
    NavItem::Users,
    NavItem::History,
    NavItem::Settings,
];
const CHEF_NAV: &[NavItem] = &[NavItem::Dashboard];
const STAFF_NAV: &[NavItem] = &[NavItem::Dashboard, NavItem::History];

/// Navigation for a role name. Unknown or missing roles get the staff menu.
pub fn nav_items(role: Option<&str>) -> &'static [NavItem] {
    match role.and_then(|r| r.parse::<Role>().ok()) {
        Some(Role::Manager) => MANAGER_NAV,
        Some(Role::Chef) => CHEF_NAV,
        Some(Role::Staff) | None => STAFF_NAV,
    }
}
