//! Main Zello server client.

use crate::auth::AuthClient;
use crate::classify::{classify, ApiResponse};
use crate::error::Result;
use crate::request::{ApiRequest, HttpMethod, Params};
use crate::session::Session;
use crate::transport::{resolve_url, HttpTransport, Transport};
use crate::types::ClientConfig;
use std::sync::Arc;
use tracing::debug;

/// Client for the Zello server administrative API.
///
/// Every call goes through the same pipeline: build the request, dispatch it,
/// classify the response. A call returns `Err` when no JSON payload could be
/// obtained, and `Ok(ApiResponse)` otherwise; check
/// [`ApiResponse::succeeded`] for the API-level outcome.
///
/// The client is cheap to clone; clones share the session.
///
/// # Example
///
/// ```ignore
/// use zello_server_client::{ClientConfig, ZelloClient};
///
/// let client = ZelloClient::new(ClientConfig::new("acme.zellowork.com", api_key))?;
///
/// let login = client.authenticate("admin", "secret").await?;
/// if !login.succeeded {
///     eprintln!("login failed: {:?}", login.status());
/// }
///
/// let channels = client.get_channels(&Default::default()).await?;
/// println!("{}", channels.payload);
///
/// client.logout().await?;
/// ```
#[derive(Clone)]
pub struct ZelloClient {
    session: Arc<Session>,
    transport: Arc<dyn Transport>,
}

impl ZelloClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that dispatches through a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let host = config.host.trim().trim_end_matches('/').to_string();
        let session = Session::new(host, config.api_key, config.session_id);

        Ok(Self {
            session: Arc::new(session),
            transport,
        })
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub fn host(&self) -> &str {
        self.session.host()
    }

    /// Current session id, if authenticated or resumed.
    pub async fn session_id(&self) -> Option<String> {
        self.session.session_id().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.session_id().await.is_some()
    }

    /// Resume a session obtained earlier, without authenticating again.
    pub async fn set_session_id(&self, session_id: impl Into<String>) {
        self.session.adopt(session_id).await;
    }

    /// URL of the most recently dispatched request, for troubleshooting.
    pub async fn last_url(&self) -> Option<String> {
        self.session.last_url().await
    }

    /// Authenticate with an administrative username and password.
    ///
    /// On success the session id is stored for subsequent calls.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<ApiResponse> {
        AuthClient::new(self).authenticate(username, password).await
    }

    /// End the session. The stored session id is cleared even if the call fails.
    pub async fn logout(&self) -> Result<ApiResponse> {
        AuthClient::new(self).logout().await
    }

    /// Call `command` under the current session.
    pub async fn call(
        &self,
        command: &str,
        method: HttpMethod,
        params: &Params,
    ) -> Result<ApiResponse> {
        let session_id = self.session.session_id().await;
        self.execute(command, method, params, session_id.as_deref())
            .await
    }

    /// Build, dispatch and classify a single request.
    pub(crate) async fn execute(
        &self,
        command: &str,
        method: HttpMethod,
        params: &Params,
        session_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let request = ApiRequest::build(command, method, params, session_id);
        let url = resolve_url(self.session.host(), &request.path);
        self.session.record_url(&url).await;

        debug!(command = %command, method = %method, "Calling API");

        let body = self
            .transport
            .dispatch(request.method, &url, request.body)
            .await?;

        classify(&body)
    }
}

impl std::fmt::Debug for ZelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZelloClient")
            .field("host", &self.session.host())
            .finish_non_exhaustive()
    }
}
