//! Authenticated request gateway: the single choke point for domain calls.
//! - Attaches the current bearer token and JSON content type.
//! - On a 401, renews the access token exactly once (shared across
//!   concurrent callers) and retries the original request once.
//! - Clears the session and reports `session_expired` when renewal fails.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;

pub use client::Gateway;
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
