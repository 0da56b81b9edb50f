//! Error types for the Zello server client.
//!
//! These cover the client/transport tier only. A request that reached the
//! server and came back with a non-`"200"` code is not an error here; it is an
//! [`ApiResponse`](crate::ApiResponse) with `succeeded == false`.

use thiserror::Error;

/// Errors raised before a usable API payload was obtained.
#[derive(Error, Debug)]
pub enum ZelloClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline, unreachable or did not answer in time
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server answered with a non-success HTTP status
    #[error("HTTP error ({status}): {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body is not a JSON document
    #[error("Failed to decode response: {message}")]
    Decode { message: String, body: String },

    /// Request parameters could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Invalid host or command
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Login handshake could not be completed
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Server reported a failure code.
    ///
    /// Only produced by [`ApiResponse::into_result`](crate::ApiResponse::into_result).
    #[error("API error ({code}): {status}")]
    Api {
        code: String,
        status: String,
        payload: serde_json::Value,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZelloClientError {
    /// Whether a dispatched request failed before a JSON payload was received.
    ///
    /// Local failures (`Encode`, `InvalidUrl`, `Config`, a missing API key or a
    /// malformed token response) and API-level failures are not transport errors.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Request(_)
            | Self::ServerUnreachable(_)
            | Self::HttpStatus { .. }
            | Self::Decode { .. } => true,
            Self::Auth(AuthError::Transport(inner)) => inner.is_transport(),
            _ => false,
        }
    }
}

/// Failures specific to the token/login handshake.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token request never produced a JSON payload
    #[error("token request failed: {0}")]
    Transport(#[source] Box<ZelloClientError>),

    /// The token response lacked a required field
    #[error("malformed token response: missing `{0}`")]
    MalformedResponse(&'static str),

    /// No API key configured, so the login hash cannot be computed
    #[error("API key is not configured")]
    MissingApiKey,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ZelloClientError>;
