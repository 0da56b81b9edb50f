//! Transport dispatch: executes a built request and returns the raw body.

use crate::error::{Result, ZelloClientError};
use crate::request::HttpMethod;
use crate::types::ClientConfig;
use crate::VERSION;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Something that can carry an API request to the server.
///
/// Implementations must attempt each request exactly once and report any
/// failure below the API layer as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the whole response body as text.
    async fn dispatch(&self, method: HttpMethod, url: &str, body: Option<String>)
        -> Result<String>;
}

/// Resolve a request path against the configured host.
///
/// The host is used as-is when it already names a scheme, otherwise
/// `http://` is assumed.
pub fn resolve_url(host: &str, path: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}/{}", host, path)
    } else {
        format!("http://{}/{}", host, path)
    }
}

/// [`Transport`] over HTTP(S) using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with the config's connect and read timeouts.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("ZelloServerClient/{} (Rust)", VERSION));

        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .user_agent(user_agent)
            .build()
            .map_err(ZelloClientError::Request)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<String> {
        debug!(method = %method, url = %url, has_body = body.is_some(), "Dispatching request");

        let mut request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url).header(CONTENT_TYPE, FORM_CONTENT_TYPE),
        };
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        debug!(status = %status, bytes = text.len(), "Received response");

        if !status.is_success() {
            return Err(ZelloClientError::HttpStatus {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ZelloClientError {
    if e.is_connect() || e.is_timeout() {
        ZelloClientError::ServerUnreachable(e.to_string())
    } else if e.is_builder() {
        ZelloClientError::InvalidUrl(e.to_string())
    } else {
        ZelloClientError::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_adds_scheme() {
        assert_eq!(
            resolve_url("example.com", "user/gettoken"),
            "http://example.com/user/gettoken"
        );
    }

    #[test]
    fn test_resolve_url_keeps_scheme() {
        assert_eq!(
            resolve_url("https://acme.zellowork.com/", "user/login?sid=x"),
            "https://acme.zellowork.com/user/login?sid=x"
        );
        assert_eq!(
            resolve_url("http://127.0.0.1:8080", "/channel/get"),
            "http://127.0.0.1:8080/channel/get"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let config = ClientConfig::new("127.0.0.1:1", "key");
        let transport = HttpTransport::new(&config).unwrap();

        let result = transport
            .dispatch(HttpMethod::Get, "http://127.0.0.1:1/user/gettoken", None)
            .await;

        match result {
            Err(ZelloClientError::ServerUnreachable(_) | ZelloClientError::Request(_)) => {}
            other => panic!("Expected transport error, got: {:?}", other),
        }
    }
}
