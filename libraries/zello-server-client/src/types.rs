//! Configuration and request input types for the Zello server API.

use crate::auth::md5_hex;
use crate::error::{Result, ZelloClientError};
use crate::request::Params;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for connecting to a Zello server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Server hostname or IP address, optionally with an `http://` or `https://` scheme
    pub host: String,

    /// API key issued for the calling application
    #[serde(default)]
    pub api_key: String,

    /// Session id to resume without authenticating again
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Whole-request timeout: caps sending the request and reading the entire
    /// response, not each individual read
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_connect_timeout_ms() -> u64 {
    15_000
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

impl ClientConfig {
    /// Create a config for a fresh (unauthenticated) client.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            session_id: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            user_agent: None,
        }
    }

    /// Create a config that resumes an existing session.
    pub fn with_session(
        host: impl Into<String>,
        api_key: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::new(host, api_key)
        }
    }

    /// Override both timeouts.
    pub fn timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout_ms = connect.as_millis() as u64;
        self.read_timeout_ms = read.as_millis() as u64;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Load configuration from an optional file and the environment.
    ///
    /// Environment variables are prefixed with `ZELLO_` (e.g. `ZELLO_HOST`,
    /// `ZELLO_API_KEY`) and override values from the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ZelloClientError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        // Env values stay strings; API keys may be all digits
        settings = settings.add_source(config::Environment::with_prefix("ZELLO"));

        let config = settings
            .build()
            .map_err(|e| ZelloClientError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ZelloClientError::Config(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ZelloClientError::InvalidUrl("host cannot be empty".into()));
        }

        if let Some((scheme, _)) = host.split_once("://") {
            if scheme != "http" && scheme != "https" {
                return Err(ZelloClientError::InvalidUrl(format!(
                    "unsupported scheme `{}`, expected http:// or https://",
                    scheme
                )));
            }
        }

        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 {
            return Err(ZelloClientError::Config(
                "timeouts must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Query Filters
// =============================================================================

/// Filter for `user/get`. The default lists every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Fetch details of a single user
    pub login: Option<String>,
    /// Restrict to members of a channel
    pub channel: Option<String>,
    /// List gateways instead of users
    pub gateway: bool,
    pub max: Option<u32>,
    pub start: Option<u32>,
}

impl UserFilter {
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn gateways(mut self) -> Self {
        self.gateway = true;
        self
    }

    pub fn page(mut self, start: u32, max: u32) -> Self {
        self.start = Some(start);
        self.max = Some(max);
        self
    }
}

/// Filter for `channel/get`. The default lists every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    pub name: Option<String>,
    pub max: Option<u32>,
    pub start: Option<u32>,
}

impl ChannelFilter {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn page(mut self, start: u32, max: u32) -> Self {
        self.start = Some(start);
        self.max = Some(max);
        self
    }
}

// =============================================================================
// User Types
// =============================================================================

/// User attributes for `user/save`.
///
/// When adding a user `name` and `password` are required; when updating only
/// `name` is. Unset attributes are left unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetails {
    /// Username
    pub name: String,
    /// MD5 hex digest of the user's password
    pub password: Option<String>,
    pub email: Option<String>,
    /// Display alias
    pub full_name: Option<String>,
    /// Position
    pub job: Option<String>,
    /// Access to the admin console
    pub admin: Option<bool>,
    /// Restricted from starting 1-on-1 conversations
    pub limited_access: Option<bool>,
    /// Save as a gateway rather than a regular user
    pub gateway: Option<bool>,
    /// Fail instead of updating when the user already exists
    pub add: Option<bool>,
}

impl UserDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the password from plain text; only its MD5 digest is sent.
    pub fn with_plain_password(mut self, password: &str) -> Self {
        self.password = Some(md5_hex(password));
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        params.push("name", &self.name);

        let strings = [
            ("password", &self.password),
            ("email", &self.email),
            ("full_name", &self.full_name),
            ("job", &self.job),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                params.push(key, value);
            }
        }

        let flags = [
            ("admin", self.admin),
            ("limited_access", self.limited_access),
            ("gateway", self.gateway),
            ("add", self.add),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                params.push(key, if value { "true" } else { "false" });
            }
        }

        params
    }
}

// =============================================================================
// Channel Role Types
// =============================================================================

/// Settings for a channel role, sent as a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_disconnect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_alerts: Option<bool>,
    /// Roles this role can talk to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    /// Settings without a dedicated field
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
