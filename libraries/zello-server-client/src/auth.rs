//! Login handshake for the Zello server API.
//!
//! The server never sees the password. The client first fetches a one-time
//! token together with a provisional session id, then logs in with
//! `md5(md5(password) + token + api_key)` under that session id.

use crate::classify::ApiResponse;
use crate::client::ZelloClient;
use crate::error::{AuthError, Result, ZelloClientError};
use crate::request::{HttpMethod, Params};
use md5::{Digest, Md5};
use tracing::{debug, info, warn};

pub(crate) const TOKEN_COMMAND: &str = "user/gettoken";
pub(crate) const LOGIN_COMMAND: &str = "user/login";
pub(crate) const LOGOUT_COMMAND: &str = "user/logout";

/// Lowercase hex MD5 digest of a UTF-8 string.
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Password hash expected by `user/login`.
pub fn hash_password(password: &str, token: &str, api_key: &str) -> String {
    let mut input = md5_hex(password);
    input.push_str(token);
    input.push_str(api_key);
    md5_hex(&input)
}

/// Token and provisional session id from `user/gettoken`.
#[derive(Debug)]
struct AuthContext {
    token: String,
    session_id: String,
}

impl AuthContext {
    fn from_response(response: &ApiResponse) -> std::result::Result<Self, AuthError> {
        let token = response
            .get_str("token")
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedResponse("token"))?;
        let session_id = response
            .get_str("sid")
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MalformedResponse("sid"))?;

        Ok(Self {
            token: token.to_string(),
            session_id: session_id.to_string(),
        })
    }
}

/// Runs the two-step handshake on behalf of a [`ZelloClient`].
pub struct AuthClient<'a> {
    client: &'a ZelloClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(client: &'a ZelloClient) -> Self {
        Self { client }
    }

    /// Authenticate with an administrative username and password.
    ///
    /// Returns the login response. The session id is adopted only when the
    /// server accepts the login; an API-level failure at either step is
    /// returned as an unsuccessful [`ApiResponse`] and leaves the session
    /// untouched.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let session = self.client.session();
        if session.api_key().is_empty() {
            return Err(AuthError::MissingApiKey.into());
        }

        let _handshake = session.lock_handshake().await;
        debug!(username = %username, "Requesting login token");

        let token_response = self
            .client
            .execute(TOKEN_COMMAND, HttpMethod::Get, &Params::new(), None)
            .await
            .map_err(|e| ZelloClientError::Auth(AuthError::Transport(Box::new(e))))?;

        if !token_response.succeeded {
            warn!(
                code = ?token_response.code(),
                status = ?token_response.status(),
                "Token request rejected"
            );
            return Ok(token_response);
        }

        let context = AuthContext::from_response(&token_response)?;

        let mut params = Params::new();
        params.push("username", username).push(
            "password",
            hash_password(password, &context.token, session.api_key()),
        );

        let login = self
            .client
            .execute(
                LOGIN_COMMAND,
                HttpMethod::Post,
                &params,
                Some(&context.session_id),
            )
            .await?;

        if login.succeeded {
            let sid = login
                .get_str("sid")
                .filter(|sid| !sid.is_empty())
                .unwrap_or(&context.session_id);
            session.adopt(sid).await;
            info!(username = %username, "Login successful");
        } else {
            warn!(
                username = %username,
                code = ?login.code(),
                status = ?login.status(),
                "Login failed"
            );
        }

        Ok(login)
    }

    /// End the current session.
    ///
    /// The local session id is cleared whatever the outcome of the call.
    pub async fn logout(&self) -> Result<ApiResponse> {
        let result = self
            .client
            .call(LOGOUT_COMMAND, HttpMethod::Get, &Params::new())
            .await;

        self.client.session().clear().await;
        info!("Logged out");

        result
    }
}
