use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use models::auth::ErrorBody;
use session::SessionStore;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Single choke point for authenticated domain calls.
///
/// This is the only place where session lifecycle and domain I/O meet: a
/// 401 here triggers the store's renewal, and a failed renewal clears the
/// session before the error reaches the caller.
pub struct Gateway {
    store: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    pub fn new(store: Arc<SessionStore>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request_with_headers(method, path, Vec::new(), body).await
    }

    /// Like [`request`](Self::request), with caller-supplied headers merged
    /// into the outbound call. The headers ride the retry too.
    pub async fn request_with_headers<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let resp = self.dispatch(method, path, headers, body).await?;
        Self::finish(resp)
    }

    /// Issue a call whose success body the caller does not care about
    /// (deletes, acknowledgements). Any 2xx body is discarded unparsed.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let resp = self.dispatch(method, path, Vec::new(), body).await?;
        if (200..300).contains(&resp.status) {
            return Ok(());
        }
        Err(Self::failure(resp))
    }

    #[instrument(skip(self, headers, body), fields(method = %method, path = %path))]
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let token = self.store.access_token().ok_or(ApiError::Unauthenticated)?;
        let req = ApiRequest {
            method,
            path: path.to_string(),
            bearer: token.clone(),
            headers,
            body,
        };

        let resp = self.transport.send(&req).await?;
        if resp.status != 401 {
            return Ok(resp);
        }

        // Access token rejected: renew once (shared with any concurrent
        // caller holding the same stale token), then retry once. The retry
        // outcome is final; a second 401 surfaces as request_failed.
        debug!("access token rejected, renewing");
        if let Err(renew_err) = self.store.renew_if_stale(&token).await {
            warn!(reason = renew_err.reason(), "token renewal failed, clearing session");
            self.store.logout().await;
            return Err(ApiError::SessionExpired);
        }
        let fresh = self.store.access_token().ok_or(ApiError::SessionExpired)?;
        let retry = ApiRequest { bearer: fresh, ..req };
        self.transport.send(&retry).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Transport(format!("could not encode request body: {e}")))?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Transport(format!("could not encode request body: {e}")))?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await
    }

    fn finish<T: DeserializeOwned>(resp: ApiResponse) -> Result<T, ApiError> {
        if (200..300).contains(&resp.status) {
            // 204s and other empty bodies deserialize as JSON null, which
            // lets callers ask for an `Option`.
            let bytes: &[u8] = if resp.body.is_empty() { b"null" } else { &resp.body };
            return serde_json::from_slice(bytes)
                .map_err(|e| ApiError::Transport(format!("invalid response body: {e}")));
        }
        Err(Self::failure(resp))
    }

    fn failure(resp: ApiResponse) -> ApiError {
        let message = serde_json::from_slice::<ErrorBody>(&resp.body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "request failed".to_string());
        ApiError::RequestFailed { status: resp.status, message }
    }
}
