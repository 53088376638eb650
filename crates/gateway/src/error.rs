use thiserror::Error;

/// Errors surfaced to UI consumers by the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("session expired")]
    SessionExpired,
    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Stable reason string for external mapping/logging.
    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::SessionExpired => "session_expired",
            ApiError::RequestFailed { .. } => "request_failed",
            ApiError::Timeout => "timeout",
            ApiError::Transport(_) => "transport_error",
        }
    }
}
