use crate::error::ApiError;
use tracing::debug;

/// Load state of one independently fetched sub-resource.
#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    NotStarted,
    Loading,
    Ready(T),
    /// The backend has nothing (yet); rendered as "no data", not as an error.
    Absent,
    Errored(String),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::NotStarted
    }
}

impl<T> Remote<T> {
    /// Any failure becomes `Errored(error_message)`.
    pub fn from_result(result: Result<T, ApiError>, error_message: &str) -> Self {
        match result {
            Ok(value) => Remote::Ready(value),
            Err(e) => {
                debug!(error = %e, "sub-resource failed");
                Remote::Errored(error_message.to_string())
            }
        }
    }

    /// Like [`Remote::from_result`], but a 404 means "not available yet".
    pub fn from_optional(result: Result<T, ApiError>, error_message: &str) -> Self {
        match result {
            Err(e) if e.is_not_found() => Remote::Absent,
            other => Self::from_result(other, error_message),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Remote::NotStarted | Remote::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Remote<U> {
        match self {
            Remote::NotStarted => Remote::NotStarted,
            Remote::Loading => Remote::Loading,
            Remote::Ready(value) => Remote::Ready(f(value)),
            Remote::Absent => Remote::Absent,
            Remote::Errored(message) => Remote::Errored(message),
        }
    }
}

impl Remote<String> {
    /// Blank text counts as absent.
    pub fn non_empty(self) -> Self {
        match self {
            Remote::Ready(text) if text.trim().is_empty() => Remote::Absent,
            other => other,
        }
    }
}
