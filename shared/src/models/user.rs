//! User Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{ParseEnumError, Timestamp};

/// Staff role. Drives dashboard navigation and which management routes
/// a user may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Manager,
    Chef,
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manager, Role::Chef, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Chef => "CHEF",
            Role::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"chef"` and `"CHEF"` both parse.
impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}

/// User projection (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full user row, password hash included. Used by login only.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            username: r.username,
            name: r.name,
            role: r.role,
            email: r.email,
            telephone: r.telephone,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 4, max = 64, message = "Username is too short"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
    #[validate(length(min = 3, max = 200, message = "Name is too short"))]
    pub name: String,
    pub role: Role,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(equal = 10, message = "Invalid phone number"))]
    pub telephone: Option<String>,
}

/// Update user payload. Absent fields are left untouched; a supplied
/// password is re-hashed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 4, max = 64, message = "Username is too short"))]
    pub username: Option<String>,
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 3, max = 200, message = "Name is too short"))]
    pub name: Option<String>,
    pub role: Option<Role>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(equal = 10, message = "Invalid phone number"))]
    pub telephone: Option<String>,
}
