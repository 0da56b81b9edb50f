//! Request building: command paths, parameter encoding and session context.

use serde::Serialize;
use std::fmt;

/// HTTP method used by an API command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent-encode a single value (UTF-8, everything but unreserved characters).
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Ordered request parameters.
///
/// Values are stored raw and encoded exactly once, in [`Params::encode`].
/// Keys are fixed API identifiers such as `login[]` and are written as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a repeated-key list as `key[]=v1&key[]=v2...`, keeping caller order.
    pub fn push_list<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = format!("{}[]", key);
        for value in values {
            self.pairs.push((key.clone(), value.into()));
        }
        self
    }

    /// Append `key=<JSON>` with the value serialized as a JSON document.
    pub fn push_json<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> serde_json::Result<&mut Self> {
        let json = serde_json::to_string(value)?;
        Ok(self.push(key, json))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key=value&key=value` with every value percent-encoded.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Builder for slash-separated command paths such as `channel/add/name/<name>`.
#[derive(Debug, Clone)]
pub struct CommandPath {
    path: String,
}

impl CommandPath {
    pub fn new(base: &str) -> Self {
        Self {
            path: base.trim_matches('/').to_string(),
        }
    }

    /// Append an encoded value segment.
    pub fn value(mut self, value: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&encode(value));
        self
    }

    /// Append `/<key>/<encoded value>`.
    pub fn arg(self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        self.literal(key).value(&value)
    }

    /// Append `/<key>/<encoded value>` when a value is present.
    pub fn opt_arg<T: fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.arg(key, value),
            None => self,
        }
    }

    fn literal(mut self, segment: &str) -> Self {
        self.path.push('/');
        self.path.push_str(segment);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl From<CommandPath> for String {
    fn from(path: CommandPath) -> Self {
        path.path
    }
}

/// A fully-formed API request, relative to the server root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// `<command>[?sid=<sid>][&<params>]`
    pub path: String,
    /// Encoded form body; `None` for GET
    pub body: Option<String>,
}

impl ApiRequest {
    /// Build a request for `command`.
    ///
    /// POST parameters go into the form body (possibly empty). GET requests
    /// have no body; any parameters are appended to the query string.
    pub fn build(
        command: &str,
        method: HttpMethod,
        params: &Params,
        session_id: Option<&str>,
    ) -> Self {
        let mut path = command.trim_start_matches('/').to_string();
        let mut query = Vec::new();

        if let Some(sid) = session_id {
            query.push(format!("sid={}", encode(sid)));
        }

        let body = match method {
            HttpMethod::Post => Some(params.encode()),
            HttpMethod::Get => {
                if !params.is_empty() {
                    query.push(params.encode());
                }
                None
            }
        };

        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        Self { method, path, body }
    }
}
