//! HTTP transport seam. The gateway's renewal/retry policy is tested against
//! the mock; `ReqwestTransport` is the thin production impl.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
pub use reqwest::Method;

use crate::error::ApiError;

/// One outbound domain call, fully described.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw response; the gateway owns status interpretation and body parsing.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self
            .client
            .request(req.method.clone(), &url)
            .bearer_auth(&req.bearer)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_vec();
        Ok(ApiResponse { status, body })
    }
}

/// Scripted transport for tests: answers from a handler that sees every
/// request, so token-dependent behavior (401 until renewed) stays
/// deterministic under concurrency.
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync>;

    pub struct MockTransport {
        handler: Handler,
        pub calls: AtomicUsize,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        pub fn with_handler<F>(handler: F) -> Self
        where
            F: Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
        {
            Self { handler: Box::new(handler), calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) }
        }

        /// Answer calls in order from a fixed script.
        pub fn sequence(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
            let queue = Mutex::new(VecDeque::from(responses));
            Self::with_handler(move |_req| {
                queue.lock().unwrap().pop_front().unwrap_or_else(|| {
                    Err(ApiError::Transport("no scripted response left".into()))
                })
            })
        }

        /// Respond 401 to any bearer other than `valid_token`, and with the
        /// given body otherwise. Models an expired access token that one
        /// renewal fixes.
        pub fn unauthorized_until(valid_token: &str, success_body: serde_json::Value) -> Self {
            let valid = valid_token.to_string();
            Self::with_handler(move |req| {
                if req.bearer == valid {
                    Ok(ok_json(&success_body))
                } else {
                    Ok(unauthorized())
                }
            })
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(req.clone());
            (self.handler)(req)
        }
    }

    pub fn ok_json(body: &serde_json::Value) -> ApiResponse {
        ApiResponse { status: 200, body: serde_json::to_vec(body).unwrap() }
    }

    pub fn unauthorized() -> ApiResponse {
        ApiResponse { status: 401, body: br#"{"message":"jwt expired"}"#.to_vec() }
    }

    pub fn error_response(status: u16, message: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: serde_json::to_vec(&serde_json::json!({ "message": message })).unwrap(),
        }
    }

    pub fn no_content() -> ApiResponse {
        ApiResponse { status: 204, body: Vec::new() }
    }
}
