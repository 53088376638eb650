use thiserror::Error;

/// Business errors for session workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("no refresh token available")]
    NoRefreshToken,
    #[error("refresh token rejected: {0}")]
    RefreshRejected(String),
    #[error("auth server error: {0}")]
    ServerError(String),
    #[error("session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Stable reason string for external mapping/logging.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials(_) => "invalid_credentials",
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::NoRefreshToken => "no_refresh_token",
            AuthError::RefreshRejected(_) => "refresh_rejected",
            AuthError::ServerError(_) => "server_error",
            AuthError::Storage(_) => "storage_error",
        }
    }
}
