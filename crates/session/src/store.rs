use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

use models::auth::{LoginRequest, RefreshRequest, RegisterRequest};
use models::user::{self, Role, User};
use models::barbershop::Barbershop;

use crate::api::AuthApi;
use crate::error::AuthError;
use crate::oauth::{self, CallbackOutcome};
use crate::session::Session;
use crate::storage::SessionStorage;

/// Single authority for session state.
///
/// Reads are lock-free snapshots of the latest committed session; every
/// credential mutation (login, signup, renew, logout) runs behind one async
/// mutex so racing writers cannot interleave, and a renewal that loses the
/// race to a logout finds the refresh token already gone.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<Session>,
    auth_lock: Mutex<()>,
}

impl SessionStore {
    /// Open the store, rehydrating any persisted session.
    pub async fn open(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Arc<Self>, AuthError> {
        let initial = storage.load().await?.unwrap_or_default();
        if initial.is_authenticated() {
            debug!("rehydrated persisted session");
        }
        let (state, _) = watch::channel(initial);
        Ok(Arc::new(Self { api, storage, state, auth_lock: Mutex::new(()) }))
    }

    /// Cloned snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Change feed for consumers that render off session state.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Persist then publish. Ordering matters: a snapshot a consumer observes
    /// must already be durable.
    async fn commit(&self, session: Session) -> Result<(), AuthError> {
        self.storage.save(&session).await?;
        self.state.send_replace(session);
        Ok(())
    }

    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _guard = self.auth_lock.lock().await;
        let resp = self
            .api
            .login(&LoginRequest { email: email.into(), password: password.into() })
            .await?;
        let mut session = self.current();
        session.access_token = Some(resp.access_token);
        session.refresh_token = Some(resp.refresh_token);
        session.user = Some(resp.user);
        self.commit(session).await?;
        info!("logged_in");
        Ok(())
    }

    /// Register a new client account. Returns the backend's confirmation
    /// message ("verify your email" and the like); the session is populated
    /// but the account may not be fully usable until verified.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
        phone: &str,
    ) -> Result<String, AuthError> {
        user::validate_email(email).map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
        if password.len() < 8 {
            return Err(AuthError::InvalidCredentials("password too short (>=8)".into()));
        }
        let _guard = self.auth_lock.lock().await;
        let resp = self
            .api
            .register(&RegisterRequest {
                email: email.into(),
                password: password.into(),
                username: username.into(),
                phone: phone.into(),
                role: Role::Client,
            })
            .await?;
        let mut session = self.current();
        session.access_token = Some(resp.access_token);
        session.refresh_token = Some(resp.refresh_token);
        session.user = Some(User {
            id: resp.user_id,
            email: email.into(),
            role: Role::Client,
            created_at: chrono::Utc::now(),
        });
        self.commit(session).await?;
        info!("registered");
        Ok(resp.message.unwrap_or_else(|| "account created; verify your email".into()))
    }

    /// Complete an OAuth redirect given the bearer token from the callback
    /// URL. Decodes the embedded claims locally; no backend round trip.
    #[instrument(skip(self, token))]
    pub async fn complete_oauth_callback(&self, token: &str) -> Result<CallbackOutcome, AuthError> {
        let claims = oauth::decode_callback_claims(token)?;
        let _guard = self.auth_lock.lock().await;
        let mut session = self.current();
        session.access_token = Some(token.to_string());
        session.refresh_token = Some(claims.refresh_token.clone());
        session.user = Some(User {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            role: claims.role,
            created_at: claims.issued_at(),
        });
        self.commit(session).await?;
        info!(user_id = %claims.sub, "oauth_callback_completed");
        let profile_complete = claims.profile_complete();
        Ok(CallbackOutcome { user_id: claims.sub, profile_complete })
    }

    /// Exchange the stored refresh token for a new access token.
    pub async fn renew(&self) -> Result<(), AuthError> {
        let _guard = self.auth_lock.lock().await;
        self.renew_locked().await
    }

    /// Renew only if the access token is still the one the caller last saw.
    ///
    /// Concurrent 401 handlers all funnel through here with the token their
    /// failed request used; the first performs the refresh exchange and the
    /// rest observe the replaced token and return without a network call.
    pub async fn renew_if_stale(&self, seen_access_token: &str) -> Result<(), AuthError> {
        let _guard = self.auth_lock.lock().await;
        if let Some(current) = self.state.borrow().access_token.as_deref() {
            if current != seen_access_token {
                debug!("token already renewed by a concurrent caller");
                return Ok(());
            }
        }
        self.renew_locked().await
    }

    async fn renew_locked(&self) -> Result<(), AuthError> {
        let refresh_token =
            self.state.borrow().refresh_token.clone().ok_or(AuthError::NoRefreshToken)?;
        let resp = self.api.refresh(&RefreshRequest { refresh_token }).await?;
        let mut session = self.current();
        session.access_token = Some(resp.access_token);
        if let Some(rotated) = resp.refresh_token {
            session.refresh_token = Some(rotated);
        }
        self.commit(session).await?;
        debug!("access token renewed");
        Ok(())
    }

    /// Clear the session. Idempotent; needs no network call. A failure to
    /// clear the persisted copy is logged, not surfaced, so logout always
    /// succeeds from the caller's point of view.
    pub async fn logout(&self) {
        let _guard = self.auth_lock.lock().await;
        self.state.send_replace(Session::default());
        if let Err(e) = self.storage.save(&Session::default()).await {
            warn!(error = %e, "failed to clear persisted session");
        }
        info!("logged_out");
    }

    /// Select the barbershop the dashboard operates on. No local access
    /// check; the backend rejects unauthorized tenant ids on the next call.
    pub async fn set_active_barbershop(&self, barbershop: Barbershop) {
        let _guard = self.auth_lock.lock().await;
        let mut session = self.current();
        session.active_barbershop = Some(barbershop);
        if let Err(e) = self.commit(session).await {
            warn!(error = %e, "failed to persist active barbershop");
        }
    }
}
