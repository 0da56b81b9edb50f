//! Session state shared by every call made through a client.

use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

/// Host, API key and the current session id.
///
/// `host` and `api_key` never change after construction. The session id is
/// only written through [`Session::adopt`] and [`Session::clear`].
#[derive(Debug)]
pub struct Session {
    host: String,
    api_key: String,
    session_id: RwLock<Option<String>>,
    last_url: RwLock<Option<String>>,
    handshake: Mutex<()>,
}

impl Session {
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            session_id: RwLock::new(session_id.filter(|sid| !sid.is_empty())),
            last_url: RwLock::new(None),
            handshake: Mutex::new(()),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session_id.read().await.clone()
    }

    /// Make `id` the active session.
    pub async fn adopt(&self, id: impl Into<String>) {
        *self.session_id.write().await = Some(id.into());
        debug!("Session adopted");
    }

    pub async fn clear(&self) {
        *self.session_id.write().await = None;
        debug!("Session cleared");
    }

    /// URL of the most recently dispatched request.
    pub async fn last_url(&self) -> Option<String> {
        self.last_url.read().await.clone()
    }

    pub(crate) async fn record_url(&self, url: &str) {
        *self.last_url.write().await = Some(url.to_string());
    }

    /// Serialize handshakes so two logins never interleave their session writes.
    pub(crate) async fn lock_handshake(&self) -> MutexGuard<'_, ()> {
        self.handshake.lock().await
    }
}
