use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// 启动/运行阶段的服务器错误 (请求级错误见 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(#[from] AppError),

    #[error("默认管理员创建失败: {0}")]
    Seed(#[from] RepoError),

    #[error("端口绑定失败: {0}")]
    Bind(#[source] std::io::Error),

    #[error("HTTP 服务异常退出: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
