//! Wire calls to the backend auth endpoints, behind a trait so the store can
//! be exercised without a network.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use models::auth::{
    ErrorBody, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    RegisterResponse,
};

use crate::error::AuthError;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, input: &LoginRequest) -> Result<LoginResponse, AuthError>;
    async fn register(&self, input: &RegisterRequest) -> Result<RegisterResponse, AuthError>;
    async fn refresh(&self, input: &RefreshRequest) -> Result<RefreshResponse, AuthError>;
}

/// Non-2xx outcome of a raw auth call: status plus the backend's message.
struct Rejection {
    status: Option<u16>,
    message: String,
}

pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::ServerError(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Rejection>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Rejection { status: None, message: e.to_string() })?;
        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("auth endpoint returned status {status}"));
            return Err(Rejection { status: Some(status), message });
        }
        resp.json::<T>()
            .await
            .map_err(|e| Rejection { status: None, message: format!("invalid response body: {e}") })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, input: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.post_json("/auth/login", input).await.map_err(|r| match r.status {
            Some(s) if (400..500).contains(&s) => AuthError::InvalidCredentials(r.message),
            _ => AuthError::ServerError(r.message),
        })
    }

    async fn register(&self, input: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
        self.post_json("/auth/register", input).await.map_err(|r| match r.status {
            Some(s) if (400..500).contains(&s) => AuthError::InvalidCredentials(r.message),
            _ => AuthError::ServerError(r.message),
        })
    }

    async fn refresh(&self, input: &RefreshRequest) -> Result<RefreshResponse, AuthError> {
        self.post_json("/auth/refresh-token", input).await.map_err(|r| match r.status {
            Some(_) => AuthError::RefreshRejected(r.message),
            None => AuthError::ServerError(r.message),
        })
    }
}

/// Scripted in-memory auth API for tests and doc examples.
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MockAuthApi {
        login: Mutex<VecDeque<Result<LoginResponse, AuthError>>>,
        register: Mutex<VecDeque<Result<RegisterResponse, AuthError>>>,
        refresh: Mutex<VecDeque<Result<RefreshResponse, AuthError>>>,
        pub login_calls: AtomicUsize,
        pub register_calls: AtomicUsize,
        pub refresh_calls: AtomicUsize,
    }

    impl MockAuthApi {
        pub fn push_login(&self, result: Result<LoginResponse, AuthError>) {
            self.login.lock().unwrap().push_back(result);
        }

        pub fn push_register(&self, result: Result<RegisterResponse, AuthError>) {
            self.register.lock().unwrap().push_back(result);
        }

        pub fn push_refresh(&self, result: Result<RefreshResponse, AuthError>) {
            self.refresh.lock().unwrap().push_back(result);
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, _input: &LoginRequest) -> Result<LoginResponse, AuthError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            self.login
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AuthError::ServerError("no scripted login response".into())))
        }

        async fn register(&self, _input: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            self.register
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AuthError::ServerError("no scripted register response".into())))
        }

        async fn refresh(&self, _input: &RefreshRequest) -> Result<RefreshResponse, AuthError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AuthError::ServerError("no scripted refresh response".into())))
        }
    }
}
