//! Error types for the Toyota connected-services client.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use std::time::Duration;

use thiserror::Error;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum ToyotaError {
    /// Authentication or token refresh failed. Needs new credentials or user action.
    #[error("Login failed: {0}")]
    Login(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The vehicle does not support the requested operation.
    #[error("Action not supported (status {status}): {message}")]
    ActionNotSupported { status: u16, message: String },

    /// Contract violation by the caller.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ToyotaError {
    /// Map a transport failure, reporting timeouts against the configured deadline.
    pub(crate) fn transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout.as_millis() as u64)
        } else {
            Self::Network(error)
        }
    }

    /// Create an API error from a status code and response text.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn login(message: impl Into<String>) -> Self {
        Self::Login(message.into())
    }

    /// True for [`ToyotaError::Api`] and its [`ToyotaError::ActionNotSupported`] refinement.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::ActionNotSupported { .. })
    }

    /// HTTP status carried by API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::ActionNotSupported { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Login(_) => ErrorCategory::Authentication,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ActionNotSupported { .. } => ErrorCategory::Unsupported,
            Self::Internal(_) => ErrorCategory::Internal,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the caller may retry the operation at its own cadence.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Api
                | ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Api
            | ErrorCategory::RateLimit
            | ErrorCategory::Network
            | ErrorCategory::Server => RecoverySuggestion::RetryWithBackoff,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Unsupported => RecoverySuggestion::NotSupported,
            ErrorCategory::Internal | ErrorCategory::Serialization => {
                RecoverySuggestion::ReportBug
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ToyotaError>;
