//! 认证授权模块
//!
//! 提供 JWT 会话、角色检查和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentClient`] - 当前会话上下文 (员工或桌台)
//! - [`require_auth`] - Cookie 会话守卫
//! - [`require_role`] - 角色检查中间件
//! - [`password`] - Argon2 哈希

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentClient, CurrentTable, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{PUBLIC_ROUTES, TOKEN_COOKIE, is_public_route, require_auth, require_role};
pub use password::{hash_password, verify_password};

use shared::models::Role;

/// Every staff role; used to gate routes any logged-in employee may call.
pub const STAFF_ROLES: &[Role] = &Role::ALL;

/// Management routes
pub const MANAGER_ONLY: &[Role] = &[Role::Manager];
