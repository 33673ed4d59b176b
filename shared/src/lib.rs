//! Shared types for the RMS workspace
//!
//! Domain models, request/response DTOs and small utilities used by both
//! `rms-server` and `rms-client`.

pub mod client;
pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{ClientKind, LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};
pub use response::{Count, ErrorBody};
pub use types::{ParseEnumError, Timestamp};
