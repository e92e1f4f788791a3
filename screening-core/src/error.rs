use thiserror::Error;

/// Failure of a single backend request.
///
/// The dashboard never normalizes these beyond this enum: the view that issued
/// the request decides which message to render.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("no error body"))]
    Status { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The `error` field of the backend's response body, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Backend message verbatim, or `fallback` when the backend gave none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}
