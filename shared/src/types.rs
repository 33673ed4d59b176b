//! Common types for the shared crate

use thiserror::Error;

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Returned when a string does not name a known enum variant
/// (role, table status, order status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
