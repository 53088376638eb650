//! Whole-session persistence. The session is written as a single JSON
//! document under one namespaced file; there is no partial-field persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::error::AuthError;
use crate::session::Session;

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load the persisted session, if any.
    async fn load(&self) -> Result<Option<Session>, AuthError>;
    /// Replace the persisted session with the given snapshot.
    async fn save(&self, session: &Session) -> Result<(), AuthError>;
}

/// JSON file-backed storage. Missing or unreadable files rehydrate as
/// "logged out" rather than failing startup.
pub struct FileSessionStorage {
    file_path: PathBuf,
}

impl FileSessionStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> Result<Option<Session>, AuthError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(None),
        };
        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        let data = serde_json::to_vec(session).map_err(|e| AuthError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// In-memory storage for tests.
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemorySessionStorage {
        inner: Mutex<Option<Session>>,
    }

    impl MemorySessionStorage {
        pub fn with(session: Session) -> Self {
            Self { inner: Mutex::new(Some(session)) }
        }
    }

    #[async_trait]
    impl SessionStorage for MemorySessionStorage {
        async fn load(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.inner.lock().unwrap().clone())
        }

        async fn save(&self, session: &Session) -> Result<(), AuthError> {
            *self.inner.lock().unwrap() = Some(session.clone());
            Ok(())
        }
    }
}
