//! Client core for the barberdesk dashboard: the session store, the
//! authenticated request gateway and their wiring. UI layers construct one
//! [`Client`] and hand its pieces to whatever renders.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

pub use configs::AppConfig;
pub use gateway::{ApiError, Gateway};
pub use models;
pub use session::{AuthError, Session, SessionStore};

use gateway::ReqwestTransport;
use session::api::HttpAuthApi;
use session::storage::FileSessionStorage;

/// The wired-up client core. The store is shared; the gateway holds its own
/// handle to it for the renewal path.
pub struct Client {
    pub store: Arc<SessionStore>,
    pub gateway: Gateway,
}

/// Build the client from configuration: rehydrate any persisted session and
/// stand up the HTTP plumbing. No network call happens here.
pub async fn connect(cfg: &AppConfig) -> anyhow::Result<Client> {
    let timeout = Duration::from_secs(cfg.api.timeout_secs);

    if let Some(parent) = Path::new(&cfg.storage.session_file).parent() {
        if !parent.as_os_str().is_empty() {
            common::env::ensure_env(&parent.to_string_lossy()).await?;
        }
    }

    let api = Arc::new(HttpAuthApi::new(cfg.api.base_url.as_str(), timeout)?);
    let storage = Arc::new(FileSessionStorage::new(&cfg.storage.session_file));
    let store = SessionStore::open(api, storage).await?;

    let transport = Arc::new(ReqwestTransport::new(cfg.api.base_url.as_str(), timeout)?);
    let gateway = Gateway::new(Arc::clone(&store), transport);

    debug!(base_url = %cfg.api.base_url, "client initialized");
    Ok(Client { store, gateway })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_starts_logged_out_with_a_fresh_session_file() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("barberdesk_client_{}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.session_file = dir.join("auth-session.json").to_string_lossy().into_owned();

        let client = connect(&cfg).await?;
        assert!(!client.store.is_authenticated());
        assert!(client.gateway.store().current().access_token.is_none());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
