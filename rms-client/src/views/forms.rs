//! 表单校验
//!
//! Forms hold raw input (role and status as typed text) and convert to the
//! shared payloads only after `validate()` passes.

use std::borrow::Cow;

use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, Role, TableStatus, User, UserCreate,
    UserUpdate,
};
use validator::{Validate, ValidationError};

use crate::{ClientError, ClientResult};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| invalid("role", "Role must be one of MANAGER, CHEF, STAFF"))
}

fn validate_table_status(status: &str) -> Result<(), ValidationError> {
    if status.trim().is_empty() {
        return Err(invalid("status", "Status is required"));
    }
    status
        .parse::<TableStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", "Status must be IDLE or EATING"))
}

/// 用户表单
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserForm {
    #[validate(length(min = 4, message = "Username must be at least 4 characters"))]
    pub username: String,
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    /// Case-insensitive role name
    #[validate(custom(function = "validate_role"))]
    pub role: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(equal = 10, message = "Telephone must be 10 characters"))]
    pub telephone: String,
    /// Required when creating; left out of an edit unless changed
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

impl UserForm {
    fn role(&self) -> ClientResult<Role> {
        self.role
            .parse()
            .map_err(|e: shared::ParseEnumError| ClientError::Validation(e.to_string()))
    }

    pub fn to_create(&self) -> ClientResult<UserCreate> {
        self.validate()?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| ClientError::Validation("Password is required".into()))?;
        Ok(UserCreate {
            username: self.username.trim().to_string(),
            password,
            name: self.name.trim().to_string(),
            role: self.role()?,
            email: Some(self.email.trim().to_string()),
            telephone: Some(self.telephone.clone()),
        })
    }

    pub fn to_update(&self) -> ClientResult<UserUpdate> {
        self.validate()?;
        Ok(UserUpdate {
            username: Some(self.username.trim().to_string()),
            password: self.password.clone(),
            name: Some(self.name.trim().to_string()),
            role: Some(self.role()?),
            email: Some(self.email.trim().to_string()),
            telephone: Some(self.telephone.clone()),
        })
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            email: user.email.clone().unwrap_or_default(),
            telephone: user.telephone.clone().unwrap_or_default(),
            password: None,
        }
    }
}

/// 桌台表单
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TableForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Seat must be at least 1"))]
    pub seat: i32,
    #[validate(custom(function = "validate_table_status"))]
    pub status: String,
    /// Required when creating; left out of an edit unless changed
    #[validate(length(equal = 6, message = "Passcode must be 6 characters"))]
    pub passcode: Option<String>,
}

impl TableForm {
    fn status(&self) -> ClientResult<TableStatus> {
        self.status
            .parse()
            .map_err(|e: shared::ParseEnumError| ClientError::Validation(e.to_string()))
    }

    pub fn to_create(&self) -> ClientResult<DiningTableCreate> {
        self.validate()?;
        let passcode = self
            .passcode
            .clone()
            .ok_or_else(|| ClientError::Validation("Passcode is required".into()))?;
        Ok(DiningTableCreate {
            name: self.name.trim().to_string(),
            seat: self.seat,
            passcode,
            status: Some(self.status()?),
        })
    }

    pub fn to_update(&self) -> ClientResult<DiningTableUpdate> {
        self.validate()?;
        Ok(DiningTableUpdate {
            name: Some(self.name.trim().to_string()),
            seat: Some(self.seat),
            status: Some(self.status()?),
            passcode: self.passcode.clone(),
        })
    }
}

impl From<&DiningTable> for TableForm {
    fn from(table: &DiningTable) -> Self {
        Self {
            name: table.name.clone(),
            seat: table.seat,
            status: table.status.to_string(),
            passcode: None,
        }
    }
}
