//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型 (HTTP 响应)
//! - [`logger`] - 日志初始化
//! - [`validation`] - 请求参数校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
