//! RMS Client - 餐厅管理系统前端客户端
//!
//! Talks to the RMS server over HTTP with a cookie session and keeps the
//! view state of each dashboard screen (no rendering).
//!
//! - [`RmsApi`]: every endpoint the screens need, implemented by [`HttpClient`]
//! - [`views`]: fetch-on-load screen models, forms and navigation

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use api::RmsApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};
