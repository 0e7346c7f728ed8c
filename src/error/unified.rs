//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Unsupported,
    Configuration,
    Serialization,
    Internal,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Re-prompt for username/password.
    CheckCredentials,
    RetryWithBackoff,
    IncreaseTimeout,
    CheckConfiguration,
    /// The vehicle cannot perform this request; do not retry.
    NotSupported,
    ReportBug,
}
