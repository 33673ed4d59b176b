//! RMS Server - 餐厅管理系统后端
//!
//! # 架构概述
//!
//! - **认证** (`auth`): Cookie 中的 JWT 会话 + Argon2 密码哈希
//! - **数据库** (`db`): SQLite 连接池 + 资源仓库
//! - **HTTP API** (`api`): 桌台、用户、订单、菜品、设置接口
//!
//! # 模块结构
//!
//! ```text
//! rms-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── auth/          # JWT、会话守卫、角色检查、密码哈希
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池、迁移、仓库
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{CurrentClient, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env、读取配置、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    )?;

    if config.is_production() && !config.cookie_secure {
        tracing::warn!("COOKIE_SECURE is off in production; session cookies will be sent over plain HTTP");
    }

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____  __  ________
   / __ \/  |/  / ___/
  / /_/ / /|_/ /\__ \
 / _, _/ /  / /___/ /
/_/ |_/_/  /_//____/
    "#
    );
}
