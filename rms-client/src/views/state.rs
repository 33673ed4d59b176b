//! 屏幕加载状态和提示消息

use crate::ClientError;

/// Notice shown for any failure that has no more specific message
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again later";

/// Outcome of a fetch-on-load request
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Store a list result; a 404 counts as an empty list
    pub(crate) fn from_list(result: Result<Vec<T>, ClientError>) -> (Self, Option<Notice>) {
        match result {
            Ok(rows) => (Self::Ready(rows), None),
            Err(e) if e.is_not_found() => (Self::Ready(Vec::new()), None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load list");
                (Self::Failed, Some(Notice::generic()))
            }
        }
    }
}

/// 用户提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn generic() -> Self {
        Self::Error(GENERIC_ERROR.to_string())
    }

    /// Message for a failed mutation: local form and duplicate checks keep
    /// their own text, everything else gets the generic notice
    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Validation(msg) | ClientError::Conflict(msg) => Self::Error(msg.clone()),
            _ => Self::generic(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
