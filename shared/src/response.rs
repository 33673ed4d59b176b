//! API Response types
//!
//! Successful responses are the bare JSON projection of a record (or a list
//! of them). Failures use [`ErrorBody`]:
//! ```json
//! { "code": "E0003", "message": "Order 9b0c... not found" }
//! ```
//! Clients only branch on the HTTP status; the body is informational.

use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (see `AppError::code` on the server)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `GET /<resource>/count` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub count: i64,
}
