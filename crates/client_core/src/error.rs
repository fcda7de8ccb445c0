//! Error taxonomy for the items client.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network unreachable or a response that could not be read.
    Transport,
    /// Non-2xx status reported by the service.
    Server,
    /// Rejected locally before any request was issued.
    Validation,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {}, Message: {}", .status.as_u16(), .detail.as_deref().unwrap_or("No detail"))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Server { .. } => ErrorCategory::Server,
            Self::Transport(_) | Self::Decode(_) => ErrorCategory::Transport,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode(_) => None,
        }
    }

    /// Text shown to the user. `fallback` replaces a missing server detail.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { status, detail } => format!(
                "HTTP error! status: {}, Message: {}",
                status.as_u16(),
                detail.as_deref().unwrap_or(fallback)
            ),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a valid name.")]
    EmptyName,
    #[error("Please provide a price greater than 0 (got '{0}').")]
    InvalidPrice(String),
}

impl ValidationError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
